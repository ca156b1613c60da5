//! Excel export of the consolidated table.

use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::consolidate::ConsolidatedTable;
use crate::error::ExportError;
use crate::models::config::ExportConfig;

/// MIME type of the generated workbook.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Column headers, in order. The bank column is only written when some
/// record carries a bank.
pub const HEADER_FILE: &str = "Arquivo";
pub const HEADER_BANK: &str = "Banco";
pub const HEADER_ACCOUNT: &str = "Conta";
pub const HEADER_PREVIOUS_BALANCE: &str = "Saldo Anterior";
pub const HEADER_INCOME: &str = "Rendimento";
pub const HEADER_CURRENT_BALANCE: &str = "Saldo Atual";

/// Column headers for `table`.
pub fn headers(table: &ConsolidatedTable) -> Vec<&'static str> {
    let mut headers = vec![HEADER_FILE];
    if table.has_bank() {
        headers.push(HEADER_BANK);
    }
    headers.extend([
        HEADER_ACCOUNT,
        HEADER_PREVIOUS_BALANCE,
        HEADER_INCOME,
        HEADER_CURRENT_BALANCE,
    ]);
    headers
}

/// Serialize the table into a single-sheet xlsx workbook in memory.
pub fn to_xlsx(table: &ConsolidatedTable, config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("#,##0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&config.sheet_name)?;

    let with_bank = table.has_bank();
    for (col, header) in headers(table).iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (row, record) in table.iter().enumerate() {
        let row = row as u32 + 1;
        let mut col: u16 = 0;

        worksheet.write_string(row, col, &record.file_name)?;
        col += 1;

        if with_bank {
            worksheet.write_string(row, col, record.bank.as_deref().unwrap_or(""))?;
            col += 1;
        }

        worksheet.write_string(row, col, &record.account)?;
        worksheet.write_number_with_format(row, col + 1, record.previous_balance, &money_format)?;
        worksheet.write_number_with_format(row, col + 2, record.income, &money_format)?;
        worksheet.write_number_with_format(row, col + 3, record.current_balance, &money_format)?;
    }

    worksheet.autofit();

    let buffer = workbook.save_to_buffer()?;
    debug!("Wrote {} rows to xlsx ({} bytes)", table.len(), buffer.len());
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statement::StatementRecord;
    use calamine::{open_workbook_from_rs, Reader, Xlsx};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn record(name: &str, bank: Option<&str>, current: f64) -> StatementRecord {
        StatementRecord {
            file_name: name.to_string(),
            bank: bank.map(str::to_string),
            account: "123-4".to_string(),
            previous_balance: 10.0,
            income: 0.25,
            current_balance: current,
        }
    }

    fn read_back(bytes: Vec<u8>, sheet: &str) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(sheet).unwrap();
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_rows_and_columns() {
        let table: ConsolidatedTable = vec![
            record("a.pdf", None, 1234.5),
            record("b.pdf", None, 7.0),
            StatementRecord::failed("c.pdf", None, "bad"),
        ]
        .into_iter()
        .collect();

        let bytes = to_xlsx(&table, &ExportConfig::default()).unwrap();
        let rows = read_back(bytes, "Dados");

        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            vec!["Arquivo", "Conta", "Saldo Anterior", "Rendimento", "Saldo Atual"]
        );
        assert_eq!(rows[1][0], "a.pdf");
        assert_eq!(rows[1][4], "1234.5");
        assert_eq!(rows[3][1], "Erro: bad");
        assert_eq!(rows[3][4], "0");
    }

    #[test]
    fn test_bank_column_when_present() {
        let table: ConsolidatedTable = vec![record("bb.pdf", Some("Banco do Brasil"), 1.0)]
            .into_iter()
            .collect();

        let config = ExportConfig {
            sheet_name: "Extratos".to_string(),
            ..ExportConfig::default()
        };
        let rows = read_back(to_xlsx(&table, &config).unwrap(), "Extratos");

        assert_eq!(
            rows[0],
            vec!["Arquivo", "Banco", "Conta", "Saldo Anterior", "Rendimento", "Saldo Atual"]
        );
        assert_eq!(rows[1][1], "Banco do Brasil");
        assert_eq!(rows[1][2], "123-4");
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let bytes = to_xlsx(&ConsolidatedTable::new(), &ExportConfig::default()).unwrap();
        let rows = read_back(bytes, "Dados");
        assert_eq!(rows.len(), 1);
    }
}
