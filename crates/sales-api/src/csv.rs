//! CSV rendering for the sales export

use std::borrow::Cow;
use std::collections::BTreeMap;

use sales_core::services::ExportData;

pub const UTF8_BOM: &str = "\u{feff}";
const LINE_END: &str = "\r\n";
const BASE_HEADERS: [&str; 4] = ["Date", "Member", "Amount", "Description"];

/// Quote a field when it holds a comma, quote, CR or LF; inner quotes are doubled.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        out.push_str(&escape_field(field));
        first = false;
    }
    out.push_str(LINE_END);
}

/// BOM, header row, then one CRLF-terminated row per record. Custom field
/// columns follow the base columns in the order of `data.fields`.
pub fn render_sales(data: &ExportData) -> String {
    let mut out = String::from(UTF8_BOM);

    let header = BASE_HEADERS
        .iter()
        .copied()
        .chain(data.fields.iter().map(|f| f.name.as_str()));
    push_row(&mut out, header);

    for row in &data.records {
        let record = &row.record;
        let date = record.sale_date.format("%Y-%m-%d").to_string();
        let amount = record.amount.to_string();
        let values = field_values(&record.custom_fields, data);

        let cells = [
            date.as_str(),
            row.member_name.as_str(),
            amount.as_str(),
            record.description.as_deref().unwrap_or(""),
        ];
        push_row(&mut out, cells.into_iter().chain(values));
    }
    out
}

fn field_values<'a>(values: &'a BTreeMap<String, String>, data: &'a ExportData) -> impl Iterator<Item = &'a str> {
    data.fields
        .iter()
        .map(move |f| values.get(&f.id.to_string()).map(String::as_str).unwrap_or(""))
}
