//! Smart-home budget summary demonstration data.

use super::{BudgetItem, BudgetSheet};
use rust_decimal::Decimal;

/// Sheet name of the budget summary
pub const BUDGET_SHEET_NAME: &str = "预算汇总表";
/// Title embedded in the budget summary sheet
pub const BUDGET_SHEET_TITLE: &str = "全屋智能家居方案A套餐预算汇总表";

/// Budget summary sent for `budget` and every unregistered excel template id
pub fn budget_sheet() -> BudgetSheet {
    BudgetSheet {
        name: BUDGET_SHEET_NAME.to_string(),
        title: BUDGET_SHEET_TITLE.to_string(),
        items: vec![
            BudgetItem::new(
                1,
                "小米",
                "全屋智能主控系统",
                "1、AI智能语音、自定义设备各种场景（回家、离家、会客、就餐、休闲、阅读等模式），完美实现智能化体验。 2、智能品类包括：智能灯光、智能遮阳、智能空调，智能安防等； 3、最大优势及亮点 \"无缝接入米家APP、AI智能语音控制、轻成本、轻设计、轻方案、轻对接、轻落地、轻维护\"； 4、可以根据所需的智能开关与空调语音小助手进行DIY定制。",
                "项",
                1,
                Decimal::new(1928_00, 2),
            ),
            BudgetItem::new(
                2,
                "FSXRT",
                "智能灯光",
                "1、自定义色温：智能双色温（2700~6500K的灯具，可以根据需求DIY自定义设置色温参数； 2、控制方式：单灯控制、回路控制、互控、集成控制、远程控制等； 3、自定义氛围场景：娱乐、聚会、休闲、会客等灯光场景。",
                "项",
                1,
                Decimal::new(6759_00, 2),
            ),
        ],
    }
}
