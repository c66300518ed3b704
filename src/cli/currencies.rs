use super::ui;
use crate::core::list_currencies;
use comfy_table::{Cell, CellAlignment};

pub fn run() {
    println!("{}", ui::style_text("Supported currencies", ui::StyleType::Title));
    println!("{}", currencies_table());
}

fn currencies_table() -> comfy_table::Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Symbol"),
        ui::header_cell("Decimals"),
    ]);
    for currency in list_currencies() {
        table.add_row(vec![
            Cell::new(currency.code()),
            Cell::new(currency.symbol()),
            Cell::new(currency.minor_units()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_currency_in_order() {
        let table = currencies_table();
        assert_eq!(table.row_count(), list_currencies().len());

        let text = table.to_string();
        let usd = text.find("USD").unwrap();
        let eur = text.find("EUR").unwrap();
        let kwd = text.find("KWD").unwrap();
        assert!(usd < eur && eur < kwd);
    }
}
