//! Request payload construction.
//!
//! [`build`] maps a (document type, template id, title) triple to the
//! [`ExportRequest`] sent to the generation service. It is pure and total:
//! identical inputs always give deep-equal requests and no input is rejected.
//!
//! Dispatch:
//! - excel + a registered template id → that template's sheet
//! - excel + anything else → the budget sheet ([`ExcelTemplate::FALLBACK`])
//! - word / pdf → the two fixed generic sheets, template id ignored
//!
//! The caller's title always goes to `data.title`. The excel sheets keep their own
//! embedded titles; the caller's title is never written into them.

mod budget;
mod generic;
mod quote;

pub use budget::{BUDGET_SHEET_NAME, BUDGET_SHEET_TITLE, budget_sheet};
pub use generic::generic_sheets;
pub use quote::{QUOTE_SHEET_NAME, QUOTE_SHEET_TITLE, quote_sheet};

use crate::types::DocumentType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wire payload for `POST /api/v1/export/{type}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Template the service should fill
    pub template_id: String,
    /// Document type token, repeated from the endpoint path
    pub data_type: DocumentType,
    /// Title and sheets
    pub data: ExportData,
}

/// Body of [`ExportRequest::data`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportData {
    /// User-supplied report title
    pub title: String,
    /// Sheets to render, in order
    pub sheets: Vec<Sheet>,
}

/// One sheet of the request; the shape depends on the template
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sheet {
    /// Furniture quotation
    Quote(QuoteSheet),
    /// Smart-home budget summary
    Budget(BudgetSheet),
    /// Header rows plus data rows, used for word and pdf
    Generic(GenericSheet),
}

impl Sheet {
    /// Sheet name
    pub fn name(&self) -> &str {
        match self {
            Sheet::Quote(sheet) => &sheet.name,
            Sheet::Budget(sheet) => &sheet.name,
            Sheet::Generic(sheet) => &sheet.name,
        }
    }
}

/// Quotation sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteSheet {
    /// Sheet name
    pub name: String,
    /// Title printed inside the sheet
    pub title: String,
    /// Line items
    pub items: Vec<QuoteItem>,
}

/// One quotation line
///
/// Keys on the wire are the column names the service's quote template expects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    /// Product name
    #[serde(rename = "品名")]
    pub name: String,
    /// Dimensions / specification
    #[serde(rename = "规格")]
    pub spec: String,
    /// Material notes
    #[serde(rename = "材质说明")]
    pub material_note: String,
    /// Color
    #[serde(rename = "颜色")]
    pub color: String,
    /// Quantity
    #[serde(rename = "数量")]
    pub quantity: u32,
    /// Unit price
    #[serde(rename = "单价", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// quantity × unit price
    #[serde(rename = "总价", with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    /// Remark
    #[serde(rename = "备注")]
    pub remark: String,
}

impl QuoteItem {
    /// Build an item with its total computed from quantity and unit price
    pub fn new(
        name: &str,
        spec: &str,
        material_note: &str,
        color: &str,
        quantity: u32,
        unit_price: Decimal,
        remark: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            spec: spec.to_string(),
            material_note: material_note.to_string(),
            color: color.to_string(),
            quantity,
            unit_price,
            total_price: Decimal::from(quantity) * unit_price,
            remark: remark.to_string(),
        }
    }
}

/// Budget summary sheet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetSheet {
    /// Sheet name
    pub name: String,
    /// Title printed inside the sheet
    pub title: String,
    /// Line items
    pub items: Vec<BudgetItem>,
}

/// One budget line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Row number
    #[serde(rename = "序号")]
    pub sequence: u32,
    /// Brand
    #[serde(rename = "品牌")]
    pub brand: String,
    /// Area / subsystem
    #[serde(rename = "区域")]
    pub area: String,
    /// System description
    #[serde(rename = "系统说明")]
    pub system_note: String,
    /// Unit of measure
    #[serde(rename = "单位")]
    pub unit: String,
    /// Quantity
    #[serde(rename = "工程量")]
    pub quantity: u32,
    /// Budgeted unit price
    #[serde(rename = "预算价", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// quantity × unit price
    #[serde(rename = "单项预算合价", with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
}

impl BudgetItem {
    /// Build an item with its line total computed from quantity and unit price
    pub fn new(
        sequence: u32,
        brand: &str,
        area: &str,
        system_note: &str,
        unit: &str,
        quantity: u32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            sequence,
            brand: brand.to_string(),
            area: area.to_string(),
            system_note: system_note.to_string(),
            unit: unit.to_string(),
            quantity,
            unit_price,
            line_total: Decimal::from(quantity) * unit_price,
        }
    }
}

/// Table-style sheet: header rows followed by data rows
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenericSheet {
    /// Sheet name
    pub name: String,
    /// Header rows, top to bottom
    pub headers: Vec<Vec<String>>,
    /// Data rows
    pub rows: Vec<Vec<Cell>>,
}

/// A data cell: text or integer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Integer value
    Number(i64),
    /// Text value
    Text(String),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value)
    }
}

/// Excel templates with a dedicated payload shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExcelTemplate {
    /// Furniture quotation (`quote`)
    Quote,
    /// Smart-home budget summary (`budget`, and every unregistered id)
    Budget,
}

impl ExcelTemplate {
    /// Template ids with a dedicated shape. Adding a template means adding a
    /// variant, a row here and an arm in [`ExcelTemplate::sheets`].
    pub const REGISTRY: &'static [(&'static str, ExcelTemplate)] = &[
        ("quote", ExcelTemplate::Quote),
        ("budget", ExcelTemplate::Budget),
    ];

    /// Used for any id not in [`ExcelTemplate::REGISTRY`]
    pub const FALLBACK: ExcelTemplate = ExcelTemplate::Budget;

    /// Resolve a template id; never fails
    pub fn resolve(template_id: &str) -> Self {
        Self::REGISTRY
            .iter()
            .find(|(id, _)| *id == template_id)
            .map(|(_, template)| *template)
            .unwrap_or(Self::FALLBACK)
    }

    /// Sheets sent for this template
    pub fn sheets(self) -> Vec<Sheet> {
        match self {
            ExcelTemplate::Quote => vec![Sheet::Quote(quote_sheet())],
            ExcelTemplate::Budget => vec![Sheet::Budget(budget_sheet())],
        }
    }
}

/// Build the export request for one action
pub fn build(document_type: DocumentType, template_id: &str, title: &str) -> ExportRequest {
    let sheets = match document_type {
        DocumentType::Excel => ExcelTemplate::resolve(template_id).sheets(),
        DocumentType::Word | DocumentType::Pdf => generic_sheets(),
    };

    ExportRequest {
        template_id: template_id.to_string(),
        data_type: document_type,
        data: ExportData {
            title: title.to_string(),
            sheets,
        },
    }
}
