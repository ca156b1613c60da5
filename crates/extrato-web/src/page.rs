//! Server-rendered HTML pages.

use std::fmt::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use extrato_core::statement::rules::format_brl;
use extrato_core::{ConsolidatedTable, Layout, XLSX_MIME, export};

use crate::upload::{FILES_FIELD, LAYOUT_FIELD};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #222; }
fieldset { border: 1px solid #ccc; border-radius: 6px; margin-bottom: 1rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border-bottom: 1px solid #ddd; padding: .4rem .6rem; text-align: left; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
td.error { color: #b00020; }
.metrics { display: flex; gap: 1rem; }
.metric { flex: 1; border: 1px solid #ddd; border-radius: 6px; padding: .8rem; }
.metric strong { display: block; font-size: 1.4rem; }
.bar-row { display: flex; align-items: center; gap: .5rem; margin: .2rem 0; }
.bar-label { width: 12rem; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.bar { background: #2a7ae2; height: 1rem; }
.download { display: inline-block; margin: 1rem 0; padding: .6rem 1rem; background: #1b873f; color: #fff; border-radius: 6px; text-decoration: none; }
"#;

fn layout_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

/// Escape text for HTML element and attribute content.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// The upload form.
pub fn upload_form(selected: Layout) -> String {
    let mut body = String::new();
    body.push_str("<h1>📄 Extrator de Extratos Bancários</h1>\n");
    body.push_str(
        "<p>Faça o upload dos seus extratos em PDF para gerar uma tabela consolidada em Excel.</p>\n",
    );
    body.push_str("<form method=\"post\" action=\"/process\" enctype=\"multipart/form-data\">\n");
    body.push_str("<fieldset><legend>Selecione o modelo do extrato</legend>\n");
    for layout in Layout::ALL {
        let checked = if layout == selected { " checked" } else { "" };
        let _ = writeln!(
            body,
            "<label><input type=\"radio\" name=\"{LAYOUT_FIELD}\" value=\"{}\"{checked}> {}</label><br>",
            layout.slug(),
            escape(layout.label()),
        );
    }
    body.push_str("</fieldset>\n");
    let _ = writeln!(
        body,
        "<p><input type=\"file\" name=\"{FILES_FIELD}\" accept=\"application/pdf,.pdf\" multiple required></p>"
    );
    body.push_str("<button type=\"submit\">Processar Arquivos</button>\n</form>\n");

    layout_page("Extrator de Extratos", &body)
}

/// The results page: metrics, table, balance chart and the download link.
pub fn results(layout: Layout, table: &ConsolidatedTable, xlsx: &[u8], file_name: &str) -> String {
    let summary = table.summary();
    let mut body = String::new();

    let _ = writeln!(body, "<h1>Resultados: {}</h1>", escape(layout.label()));
    let _ = writeln!(body, "<p>✅ {} arquivos processados.</p>", summary.record_count);

    body.push_str("<div class=\"metrics\">\n");
    for (label, value) in [
        ("Saldo Total", format_brl(summary.total_current_balance)),
        ("Rendimento Total", format_brl(summary.total_income)),
        ("Contas", summary.distinct_accounts.to_string()),
    ] {
        let _ = writeln!(
            body,
            "<div class=\"metric\">{label}<strong>{}</strong></div>",
            escape(&value)
        );
    }
    body.push_str("</div>\n");

    let _ = writeln!(
        body,
        "<a class=\"download\" download=\"{}\" href=\"data:{XLSX_MIME};base64,{}\">📥 Baixar Excel Consolidado</a>",
        escape(file_name),
        STANDARD.encode(xlsx),
    );

    render_table(&mut body, table);
    render_chart(&mut body, table);

    body.push_str("<p><a href=\"/\">Processar outros arquivos</a></p>\n");
    layout_page("Resultados", &body)
}

fn render_table(body: &mut String, table: &ConsolidatedTable) {
    let with_bank = table.has_bank();

    body.push_str("<table>\n<thead><tr>");
    for header in export::headers(table) {
        let _ = write!(body, "<th>{}</th>", escape(header));
    }
    body.push_str("</tr></thead>\n<tbody>\n");

    for record in table {
        body.push_str("<tr>");
        let _ = write!(body, "<td>{}</td>", escape(&record.file_name));
        if with_bank {
            let _ = write!(body, "<td>{}</td>", escape(record.bank.as_deref().unwrap_or("")));
        }
        let class = if record.is_error() { " class=\"error\"" } else { "" };
        let _ = write!(body, "<td{class}>{}</td>", escape(&record.account));
        for amount in [record.previous_balance, record.income, record.current_balance] {
            let _ = write!(body, "<td class=\"num\">{}</td>", escape(&format_brl(amount)));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");
}

fn render_chart(body: &mut String, table: &ConsolidatedTable) {
    let bars = table.balance_by_account();
    let max = bars.iter().map(|(_, v)| v.abs()).fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return;
    }

    body.push_str("<h2>Saldo Atual por Conta</h2>\n<div class=\"chart\">\n");
    for (account, balance) in bars {
        let width = (balance.abs() / max * 100.0).round();
        let _ = writeln!(
            body,
            "<div class=\"bar-row\"><span class=\"bar-label\" title=\"{account}\">{account}</span>\
             <span class=\"bar\" style=\"width: {width}%\"></span><span>{}</span></div>",
            escape(&format_brl(balance)),
            account = escape(account),
        );
    }
    body.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use extrato_core::StatementRecord;

    fn table() -> ConsolidatedTable {
        vec![
            StatementRecord {
                file_name: "<a>.pdf".to_string(),
                bank: None,
                account: "12-3".to_string(),
                previous_balance: 1000.0,
                income: 10.5,
                current_balance: 1010.5,
            },
            StatementRecord::failed("b.pdf", None, "PDF error: PDF has no pages"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b title="x">&'"#), "&lt;b title=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_upload_form_lists_layouts() {
        let html = upload_form(Layout::Standard);
        assert!(html.contains("Extrato CAIXA"));
        assert!(html.contains("Extrato Padrão 2"));
        assert!(html.contains("value=\"padrao2\" checked"));
        assert!(html.contains("name=\"files\""));
    }

    #[test]
    fn test_results_page() {
        let html = results(Layout::Caixa, &table(), b"xlsx", "extratos_processados_caixa.xlsx");
        assert!(html.contains("2 arquivos processados"));
        assert!(html.contains("R$ 1.010,50"));
        assert!(html.contains("&lt;a&gt;.pdf"));
        assert!(html.contains("class=\"error\">Erro: PDF error"));
        assert!(html.contains("download=\"extratos_processados_caixa.xlsx\""));
        assert!(html.contains(&STANDARD.encode(b"xlsx")));
        assert!(html.contains("Saldo Atual por Conta"));
        assert!(!html.contains("<th>Banco</th>"));
    }
}
