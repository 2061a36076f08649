//! Furniture quotation demonstration data.

use super::{QuoteItem, QuoteSheet};
use rust_decimal::Decimal;

/// Sheet name of the quotation
pub const QUOTE_SHEET_NAME: &str = "报价单";
/// Title embedded in the quotation sheet
pub const QUOTE_SHEET_TITLE: &str = "稻壳科技有限公司报价单";

const WOOD_MATERIAL_NOTE: &str =
    "环保要求：甲醛释放量≤5mg/100g。\n2、基材：E0级\n3、木皮表面";

/// The five-line quotation sent for the `quote` template
pub fn quote_sheet() -> QuoteSheet {
    QuoteSheet {
        name: QUOTE_SHEET_NAME.to_string(),
        title: QUOTE_SHEET_TITLE.to_string(),
        items: vec![
            QuoteItem::new(
                "大班台",
                "2400*2000*750",
                WOOD_MATERIAL_NOTE,
                "黑色",
                2,
                Decimal::new(10141_00, 2),
                "",
            ),
            QuoteItem::new(
                "文件柜",
                "2400*450*2000",
                WOOD_MATERIAL_NOTE,
                "黑色",
                3,
                Decimal::new(10716_00, 2),
                "",
            ),
            QuoteItem::new(
                "会客桌",
                "2000*800*750",
                WOOD_MATERIAL_NOTE,
                "黑色",
                6,
                Decimal::new(4500_00, 2),
                "",
            ),
            QuoteItem::new(
                "会客椅",
                "常规",
                WOOD_MATERIAL_NOTE,
                "黑色",
                1,
                Decimal::new(400_00, 2),
                "",
            ),
            QuoteItem::new(
                "中式隔断",
                "定制2800*2100",
                "采用行列式手法，风格、功能设计",
                "不锈钢包边",
                6,
                Decimal::new(1200_00, 2),
                "",
            ),
        ],
    }
}
