use serde::{Deserialize, Serialize};

use crate::{Error, Result, NOT_AVAILABLE};

/// The part of a ReceitaWS `/v1/cnpj/{cnpj}` payload we care about.
/// Every field is optional, the registry leaves them out freely.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyRecord {
    pub status: Option<String>,
    pub message: Option<String>,
    pub nome: Option<String>,
    pub situacao: Option<String>,
    pub municipio: Option<String>,
    pub uf: Option<String>,
    pub telefone: Option<String>,
    pub qsa: Option<Vec<QsaEntry>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QsaEntry {
    pub nome: Option<String>,
    pub qual: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerRecord {
    pub name: String,
    pub role: String,
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub identifier: String,
    pub partner_name: String,
    pub partner_role: String,
}

impl OutputRow {
    pub fn new(identifier: &str, partner: PartnerRecord) -> Self {
        Self {
            identifier: identifier.to_string(),
            partner_name: partner.name,
            partner_role: partner.role,
        }
    }

    /// The `N/A`/`N/A` row written when there are no partners to report.
    pub fn placeholder(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            partner_name: NOT_AVAILABLE.to_string(),
            partner_role: NOT_AVAILABLE.to_string(),
        }
    }
}

/// One line of the company details report: one per CNPJ, partners joined by `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedRow {
    pub identifier: String,
    pub company_name: String,
    pub status: String,
    pub city: String,
    pub state: String,
    pub owners: String,
    pub phone: String,
}

impl DetailedRow {
    /// `partner_rows` are the rows already produced for this CNPJ by [`rows_for`],
    /// so a company without partners gets `N/A` as owner.
    pub fn new(
        identifier: &str,
        lookup: &Result<CompanyRecord>,
        partner_rows: &[OutputRow],
    ) -> Self {
        let company = lookup.as_ref().ok();

        Self {
            identifier: identifier.to_string(),
            company_name: or_not_available(company.and_then(|c| c.nome.as_deref())),
            status: or_not_available(company.and_then(|c| c.situacao.as_deref())),
            city: or_not_available(company.and_then(|c| c.municipio.as_deref())),
            state: or_not_available(company.and_then(|c| c.uf.as_deref())),
            owners: partner_rows
                .iter()
                .map(|row| row.partner_name.as_str())
                .collect::<Vec<_>>()
                .join("/"),
            phone: or_not_available(company.and_then(|c| c.telefone.as_deref())),
        }
    }
}

impl CompanyRecord {
    /// ReceitaWS answers unknown or malformed CNPJs with HTTP 200 and `"status": "ERROR"`.
    pub fn check_status(self) -> Result<Self> {
        if self.status.as_deref() == Some("ERROR") {
            let message = self
                .message
                .unwrap_or_else(|| "status ERROR without message".to_string());
            return Err(Error::Registry(message));
        }
        Ok(self)
    }

    pub fn has_partners(&self) -> bool {
        self.qsa.as_ref().is_some_and(|qsa| !qsa.is_empty())
    }

    pub fn partners(&self) -> Vec<PartnerRecord> {
        self.qsa
            .iter()
            .flatten()
            .map(|entry| PartnerRecord {
                name: or_not_available(entry.nome.as_deref()),
                role: or_not_available(entry.qual.as_deref()),
            })
            .collect()
    }
}

/// Rows for one lookup: one per partner, or a single placeholder row when
/// the lookup failed or found no partners.
pub fn rows_for(identifier: &str, lookup: &Result<CompanyRecord>) -> Vec<OutputRow> {
    let partners = match lookup {
        Ok(record) => record.partners(),
        Err(_) => Vec::new(),
    };
    if partners.is_empty() {
        return vec![OutputRow::placeholder(identifier)];
    }
    partners
        .into_iter()
        .map(|partner| OutputRow::new(identifier, partner))
        .collect()
}

#[inline]
fn or_not_available(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
