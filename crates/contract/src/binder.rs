//! Binding client data into the contract wording

use crate::clauses;
use crate::record::ClientRecord;
use chrono::{Datelike, NaiveDate};
use pdf_core::flow::escape_markup;

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Portuguese month name for `month` (1-12)
pub fn month_name_pt(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTHS_PT.get(index as usize))
        .copied()
        .unwrap_or("")
}

/// Two decimals, comma as decimal separator, no grouping
///
/// Non-finite values format as zero.
pub fn format_credit_limit(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let formatted = format!("{value:.2}");
    // Avoid "-0,00" for tiny negatives
    let formatted = if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    };
    formatted.replace('.', ",")
}

/// Text substituted into the contract, before markup escaping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractFields {
    pub nome_filial: String,
    pub cnpj_filial: String,
    pub endereco_filial: String,
    pub nome_comprador: String,
    pub rg: String,
    pub cpf: String,
    pub endereco: String,
    pub numero: String,
    pub cidade: String,
    pub limite_credito: String,
    /// Day of month, two digits
    pub dia: String,
    pub mes: String,
    pub ano: String,
}

impl ContractFields {
    pub fn from_record(record: &ClientRecord, date: NaiveDate) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            nome_filial: text(&record.nome_filial),
            cnpj_filial: text(&record.cnpj_filial),
            endereco_filial: text(&record.endereco_filial),
            nome_comprador: text(&record.nome_comprador),
            rg: text(&record.rg),
            cpf: text(&record.cpf),
            endereco: text(&record.endereco),
            numero: text(&record.numero),
            cidade: text(&record.cidade),
            limite_credito: format_credit_limit(record.credit_limit()),
            dia: format!("{:02}", date.day()),
            mes: month_name_pt(date.month()).to_string(),
            ano: format!("{:04}", date.year()),
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        let value = match key {
            "nome_filial" => &self.nome_filial,
            "cnpj_filial" => &self.cnpj_filial,
            "endereco_filial" => &self.endereco_filial,
            "nome_comprador" => &self.nome_comprador,
            "rg" => &self.rg,
            "cpf" => &self.cpf,
            "endereco" => &self.endereco,
            "numero" => &self.numero,
            "cidade" => &self.cidade,
            "limite_credito" => &self.limite_credito,
            "dia" => &self.dia,
            "mes" => &self.mes,
            "ano" => &self.ano,
            _ => return None,
        };
        Some(value)
    }
}

/// Fills the contract wording with one client's data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBinder {
    fields: ContractFields,
}

impl TemplateBinder {
    pub fn new(record: &ClientRecord, date: NaiveDate) -> Self {
        Self {
            fields: ContractFields::from_record(record, date),
        }
    }

    pub fn fields(&self) -> &ContractFields {
        &self.fields
    }

    /// Replace `{name}` placeholders with escaped field values
    ///
    /// Unknown placeholders are left untouched.
    pub fn fill(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let value = after
                .find('}')
                .and_then(|end| self.fields.lookup(&after[..end]).map(|v| (v, end)));
            match value {
                Some((value, end)) => {
                    out.push_str(&escape_markup(value));
                    rest = &after[end + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Contract body markup
    pub fn body(&self) -> String {
        self.fill(clauses::BODY)
    }

    /// `Cidade, DD de mês de AAAA`
    pub fn date_line(&self) -> String {
        self.fill(clauses::DATE_LINE)
    }

    pub fn registration_notice(&self) -> String {
        self.fill(clauses::REGISTRATION_NOTICE)
    }

    pub fn buyer_caption(&self) -> String {
        self.fill(clauses::CAPTION_BUYER)
    }
}
