// ==========================================
// 制造运营影响评估系统 - 报告层
// ==========================================
// 版面规划 (纯函数) 与 PDF 绘制分离:
// layout 决定区块顺序, renderer 负责分页与坐标
// ==========================================

pub mod layout;
pub mod renderer;
pub mod theme;

pub use layout::{MetricTile, ReportBlock, VarianceRow, PRODUCT_NAME};
pub use renderer::{report_file_name, RenderedReport, ReportError, ReportRenderer};
pub use theme::{ReportTheme, ThemeColor, TileTone};
