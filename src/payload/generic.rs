//! Fixed tables sent for word and pdf exports.

use super::{Cell, GenericSheet, Sheet};

fn headers(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|h| h.to_string()).collect())
        .collect()
}

/// The two sheets every word/pdf export carries: a name/age table and a
/// product/price/quantity table
pub fn generic_sheets() -> Vec<Sheet> {
    vec![
        Sheet::Generic(GenericSheet {
            name: "Sheet1".to_string(),
            headers: headers(&[&["姓名", "年龄"], &["详细信息", ""]]),
            rows: vec![
                vec![Cell::from("张三"), Cell::from(25)],
                vec![Cell::from("李四"), Cell::from(30)],
                vec![Cell::from("王五"), Cell::from(28)],
            ],
        }),
        Sheet::Generic(GenericSheet {
            name: "Sheet2".to_string(),
            headers: headers(&[&["产品", "价格", "数量"]]),
            rows: vec![
                vec![Cell::from("产品A"), Cell::from(100), Cell::from(5)],
                vec![Cell::from("产品B"), Cell::from(200), Cell::from(3)],
                vec![Cell::from("产品C"), Cell::from(150), Cell::from(8)],
            ],
        }),
    ]
}
