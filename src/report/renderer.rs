// ==========================================
// 制造运营影响评估系统 - PDF 报告渲染器
// ==========================================
// 职责: 把版面规划的区块序列绘制为分页 PDF
// 输出: 内存字节流 (文件落盘由 api 层在渲染完全成功后执行,
//       部分渲染结果绝不落盘)
// ==========================================
// 分页红线: 每写一行/一个列表项前都检查剩余纵向空间,
//           超长的缓解措施列表不得溢出页面边界
// 页脚在总页数确定后统一补绘 ("Page X of Y")
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerIndex, PdfLayerReference, PdfPageIndex, Point, Polygon, Rgb,
};
use thiserror::Error;

use crate::domain::impact::DepartmentImpact;
use crate::domain::insight::AiInsight;
use crate::domain::project::Project;
use crate::domain::variance::Variance;
use crate::report::layout::{self, MetricTile, ReportBlock, VarianceRow, PRODUCT_NAME};
use crate::report::theme::{
    impact_level_tone, insight_severity_tone, ReportTheme, ThemeColor,
};

// ==========================================
// 版面几何 (A4, 单位 mm)
// ==========================================
const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN_LEFT: f64 = 15.0;
const MARGIN_RIGHT: f64 = 15.0;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
const TOP_Y: f64 = PAGE_HEIGHT - 15.0;
/// 正文下边界 (页脚区之上)
const BOTTOM_Y: f64 = 20.0;
const FOOTER_Y: f64 = 10.0;

const WHITE: ThemeColor = ThemeColor::new(1.0, 1.0, 1.0);

// ==========================================
// 错误与结果类型
// ==========================================

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF 生成失败: {0}")]
    Pdf(String),
}

/// 渲染结果: 文件名 + 字节流 + 页数
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// 报告文件名: Impact-Assessment-<项目号>-<ISO 日期>.pdf
pub fn report_file_name(project_number: &str, date: NaiveDate) -> String {
    format!(
        "Impact-Assessment-{}-{}.pdf",
        project_number,
        date.format("%Y-%m-%d")
    )
}

// ==========================================
// ReportRenderer - 报告渲染器
// ==========================================
pub struct ReportRenderer {
    theme: ReportTheme,
}

impl ReportRenderer {
    pub fn new(theme: ReportTheme) -> Self {
        Self { theme }
    }

    /// 版面规划 (纯函数, 区块顺序即输出契约)
    pub fn plan(
        &self,
        project: &Project,
        variances: &[Variance],
        impacts: &[DepartmentImpact],
        insights: Option<&AiInsight>,
        generated_at: NaiveDateTime,
    ) -> Vec<ReportBlock> {
        layout::plan(project, variances, impacts, insights, generated_at)
    }

    /// 渲染完整报告到内存
    ///
    /// `generated_at` 由调用方显式传入, 渲染器不读时钟
    pub fn render(
        &self,
        project: &Project,
        variances: &[Variance],
        impacts: &[DepartmentImpact],
        insights: Option<&AiInsight>,
        generated_at: NaiveDateTime,
    ) -> Result<RenderedReport, ReportError> {
        let blocks = self.plan(project, variances, impacts, insights, generated_at);
        let file_name = report_file_name(&project.project_number, generated_at.date());

        let mut painter = Painter::new("Impact Assessment Report", self.theme.clone())?;

        for block in &blocks {
            match block {
                ReportBlock::Title => painter.paint_title(),
                ReportBlock::ProjectInfo {
                    name,
                    project_number,
                    generated_at,
                } => painter.paint_project_info(name, project_number, generated_at),
                ReportBlock::MetricTiles { tiles } => painter.paint_tiles(tiles),
                ReportBlock::ExecutiveSummary { text } => painter.paint_summary(text),
                ReportBlock::VarianceTable { rows } => painter.paint_variance_table(rows),
                ReportBlock::DepartmentSection { impact } => painter.paint_department(impact),
                ReportBlock::InsightBlock { insight } => painter.paint_insights(insight),
            }
        }

        let footer_stamp = generated_at.format("%Y-%m-%d %H:%M").to_string();
        painter.paint_footers(&footer_stamp);

        let page_count = painter.page_count();
        let bytes = painter.into_bytes()?;

        tracing::info!(
            file_name = %file_name,
            pages = page_count,
            bytes = bytes.len(),
            "报告渲染完成"
        );

        Ok(RenderedReport {
            file_name,
            bytes,
            page_count,
        })
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(ReportTheme::default())
    }
}

// ==========================================
// Painter - 分页绘制游标
// ==========================================
struct Painter {
    doc: PdfDocumentReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    layer: PdfLayerReference,
    /// 当前基线纵坐标 (自页顶向下递减)
    y: f64,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    theme: ReportTheme,
}

impl Painter {
    fn new(title: &str, theme: ReportTheme) -> Result<Self, ReportError> {
        let (doc, page, layer_idx) =
            PdfDocument::new(title, Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "content");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer_idx);

        Ok(Self {
            doc,
            pages: vec![(page, layer_idx)],
            layer,
            y: TOP_Y,
            font,
            bold,
            theme,
        })
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn into_bytes(self) -> Result<Vec<u8>, ReportError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| ReportError::Pdf(e.to_string()))
    }

    // ==========================================
    // 分页与游标
    // ==========================================

    fn new_page(&mut self) {
        let (page, layer_idx) = self.doc.add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "content");
        self.layer = self.doc.get_page(page).get_layer(layer_idx);
        self.pages.push((page, layer_idx));
        self.y = TOP_Y;
    }

    /// 空间不足即换页 (逐行/逐项调用)
    fn ensure_space(&mut self, needed_mm: f64) {
        if self.y - needed_mm < BOTTOM_Y {
            self.new_page();
        }
    }

    fn advance(&mut self, mm: f64) {
        self.y -= mm;
    }

    // ==========================================
    // 基础绘制
    // ==========================================

    fn set_fill(&self, color: ThemeColor) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(color.r as f32, color.g as f32, color.b as f32, None)));
    }

    fn text_at(&self, text: &str, size: f64, x: f64, y: f64, bold: bool, color: ThemeColor) {
        self.set_fill(color);
        let font = if bold { &self.bold } else { &self.font };
        self.layer.use_text(text, size as f32, Mm(x as f32), Mm(y as f32), font);
    }

    /// 在当前游标行写字 (不推进游标)
    fn text(&self, text: &str, size: f64, x: f64, bold: bool, color: ThemeColor) {
        self.text_at(text, size, x, self.y, bold, color);
    }

    /// 实心矩形, (x, y_top) 为左上角
    fn fill_rect(&self, x: f64, y_top: f64, width: f64, height: f64, color: ThemeColor) {
        self.set_fill(color);
        let rect = Polygon {
            rings: vec![vec![
                (Point::new(Mm(x as f32), Mm(y_top as f32)), false),
                (Point::new(Mm((x + width) as f32), Mm(y_top as f32)), false),
                (Point::new(Mm((x + width) as f32), Mm((y_top - height) as f32)), false),
                (Point::new(Mm(x as f32), Mm((y_top - height) as f32)), false),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        };
        self.layer.add_polygon(rect);
    }

    /// 水平分隔线
    fn hline(&self, y: f64, color: ThemeColor) {
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(color.r as f32, color.g as f32, color.b as f32, None)));
        self.layer.set_outline_thickness(0.6);
        let line = Line {
            points: vec![
                (Point::new(Mm(MARGIN_LEFT as f32), Mm(y as f32)), false),
                (Point::new(Mm((PAGE_WIDTH - MARGIN_RIGHT) as f32), Mm(y as f32)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    // ==========================================
    // 区块绘制
    // ==========================================

    fn paint_title(&mut self) {
        self.ensure_space(16.0);
        self.text(
            "Impact Assessment Report",
            19.0,
            MARGIN_LEFT,
            true,
            self.theme.text,
        );
        self.advance(3.0);
        self.hline(self.y, self.theme.muted);
        self.advance(7.0);
    }

    fn paint_project_info(&mut self, name: &str, project_number: &str, generated_at: &str) {
        self.ensure_space(16.0);
        self.text(name, 12.0, MARGIN_LEFT, true, self.theme.text);
        self.advance(5.5);
        self.text(
            &format!("Project Number: {}", project_number),
            9.5,
            MARGIN_LEFT,
            false,
            self.theme.text,
        );
        self.advance(4.5);
        self.text(
            &format!("Generated: {}", generated_at),
            9.5,
            MARGIN_LEFT,
            false,
            self.theme.muted,
        );
        self.advance(7.0);
    }

    fn paint_tiles(&mut self, tiles: &[MetricTile; 3]) {
        const TILE_HEIGHT: f64 = 23.0;
        const TILE_GAP: f64 = 6.0;
        let tile_width = (CONTENT_WIDTH - 2.0 * TILE_GAP) / 3.0;

        self.ensure_space(TILE_HEIGHT + 5.0);
        let top = self.y;

        for (i, tile) in tiles.iter().enumerate() {
            let x = MARGIN_LEFT + i as f64 * (tile_width + TILE_GAP);
            let color = self.theme.color_for(tile.tone);
            self.fill_rect(x, top, tile_width, TILE_HEIGHT, color);
            self.text_at(&tile.value, 15.0, x + 4.0, top - 9.0, true, WHITE);
            self.text_at(&tile.label, 8.5, x + 4.0, top - 15.0, true, WHITE);
            self.text_at(&tile.caption, 7.0, x + 4.0, top - 20.0, false, WHITE);
        }

        self.advance(TILE_HEIGHT + 7.0);
    }

    fn paint_summary(&mut self, text: &str) {
        self.ensure_space(12.0);
        self.text("Executive Summary", 12.0, MARGIN_LEFT, true, self.theme.text);
        self.advance(6.0);

        for line in wrap_text(text, CONTENT_WIDTH, 9.5) {
            self.ensure_space(4.5);
            self.text(&line, 9.5, MARGIN_LEFT, false, self.theme.text);
            self.advance(4.5);
        }
        self.advance(4.0);
    }

    fn paint_variance_table(&mut self, rows: &[VarianceRow]) {
        const COL_PHASE: f64 = MARGIN_LEFT;
        const COL_BASELINE: f64 = 78.0;
        const COL_CURRENT: f64 = 108.0;
        const COL_DAYS: f64 = 140.0;
        const COL_STATUS: f64 = 163.0;
        const ROW_H: f64 = 5.2;

        self.ensure_space(12.0 + ROW_H * 2.0);
        self.text("Schedule Variances", 12.0, MARGIN_LEFT, true, self.theme.text);
        self.advance(6.5);

        if rows.is_empty() {
            self.text(
                "No schedule variances recorded.",
                9.5,
                MARGIN_LEFT,
                false,
                self.theme.muted,
            );
            self.advance(8.0);
            return;
        }

        // 表头
        self.text("Phase", 9.0, COL_PHASE, true, self.theme.text);
        self.text("Original", 9.0, COL_BASELINE, true, self.theme.text);
        self.text("Current", 9.0, COL_CURRENT, true, self.theme.text);
        self.text("Variance", 9.0, COL_DAYS, true, self.theme.text);
        self.text("Status", 9.0, COL_STATUS, true, self.theme.text);
        self.advance(1.8);
        self.hline(self.y, self.theme.muted);
        self.advance(ROW_H);

        // 数据行 (逐行检查剩余空间)
        for row in rows {
            self.ensure_space(ROW_H);
            let status_color = if row.is_delayed {
                self.theme.danger
            } else {
                self.theme.success
            };
            self.text(&row.phase, 9.0, COL_PHASE, false, self.theme.text);
            self.text(&row.baseline_date, 9.0, COL_BASELINE, false, self.theme.text);
            self.text(&row.current_date, 9.0, COL_CURRENT, false, self.theme.text);
            self.text(&row.signed_days, 9.0, COL_DAYS, true, status_color);
            self.text(&row.direction_label, 9.0, COL_STATUS, false, status_color);
            self.advance(ROW_H);
        }
        self.advance(4.0);
    }

    fn paint_department(&mut self, impact: &DepartmentImpact) {
        let level_color = self.theme.color_for(impact_level_tone(impact.impact_level));

        // 区块头: 部门名 + 等级标签
        self.ensure_space(14.0);
        let name = impact.department.display_name();
        self.text(name, 11.0, MARGIN_LEFT, true, self.theme.text);
        let tag_x = MARGIN_LEFT + text_width_mm(name, 11.0) + 3.0;
        self.text(
            &impact.impact_level.to_string().to_uppercase(),
            9.0,
            tag_x,
            true,
            level_color,
        );
        self.advance(5.0);

        for line in wrap_text(&impact.description, CONTENT_WIDTH, 9.0) {
            self.ensure_space(4.2);
            self.text(&line, 9.0, MARGIN_LEFT, false, self.theme.text);
            self.advance(4.2);
        }
        self.advance(1.5);

        self.paint_bullet_list("Specific Impacts:", &impact.specific_impacts);
        self.paint_bullet_list("Mitigation Actions:", &impact.mitigation_actions);

        if let Some(cost) = &impact.estimated_cost {
            self.ensure_space(4.2);
            self.text(
                &format!("Estimated Cost: {}", cost),
                9.0,
                MARGIN_LEFT,
                true,
                self.theme.text,
            );
            self.advance(4.2);
        }
        if let Some(timeline) = &impact.timeline_impact {
            self.ensure_space(4.2);
            self.text(
                &format!("Timeline Impact: {}", timeline),
                9.0,
                MARGIN_LEFT,
                true,
                self.theme.text,
            );
            self.advance(4.2);
        }
        self.advance(4.0);
    }

    /// 带标题的列表 (逐项检查空间, 长列表可跨页)
    fn paint_bullet_list(&mut self, heading: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        self.ensure_space(4.5);
        self.text(heading, 9.0, MARGIN_LEFT, true, self.theme.text);
        self.advance(4.5);

        for item in items {
            let lines = wrap_text(item, CONTENT_WIDTH - 6.0, 9.0);
            for (i, line) in lines.iter().enumerate() {
                self.ensure_space(4.2);
                if i == 0 {
                    self.text("-", 9.0, MARGIN_LEFT + 2.0, false, self.theme.text);
                }
                self.text(line, 9.0, MARGIN_LEFT + 6.0, false, self.theme.text);
                self.advance(4.2);
            }
        }
        self.advance(1.5);
    }

    fn paint_insights(&mut self, insight: &AiInsight) {
        self.ensure_space(14.0);
        self.text("AI Insights", 12.0, MARGIN_LEFT, true, self.theme.text);
        self.advance(6.0);

        for line in wrap_text(&insight.summary, CONTENT_WIDTH, 9.0) {
            self.ensure_space(4.2);
            self.text(&line, 9.0, MARGIN_LEFT, false, self.theme.muted);
            self.advance(4.2);
        }
        self.advance(2.0);

        for entry in &insight.insights {
            let tone_color = self.theme.color_for(insight_severity_tone(entry.severity));
            let tag = format!("[{}]", entry.severity.to_string().to_uppercase());
            let indent = text_width_mm(&tag, 8.5) + 2.0;

            let lines = wrap_text(&entry.text, CONTENT_WIDTH - indent, 9.0);
            for (i, line) in lines.iter().enumerate() {
                self.ensure_space(4.2);
                if i == 0 {
                    self.text(&tag, 8.5, MARGIN_LEFT, true, tone_color);
                }
                self.text(line, 9.0, MARGIN_LEFT + indent, false, self.theme.text);
                self.advance(4.2);
            }
            if let Some(detail) = &entry.detail {
                for line in wrap_text(detail, CONTENT_WIDTH - indent, 8.0) {
                    self.ensure_space(3.8);
                    self.text(&line, 8.0, MARGIN_LEFT + indent, false, self.theme.muted);
                    self.advance(3.8);
                }
            }
            self.advance(1.5);
        }

        let confidence_pct = (insight.confidence * 100.0).round() as i64;
        self.ensure_space(4.5);
        self.text(
            &format!("Confidence: {}%", confidence_pct),
            9.0,
            MARGIN_LEFT,
            true,
            self.theme.text,
        );
        self.advance(4.5);
    }

    // ==========================================
    // 页脚 (总页数确定后统一补绘)
    // ==========================================

    fn paint_footers(&self, generated_stamp: &str) {
        let total = self.pages.len();
        for (i, (page, layer_idx)) in self.pages.iter().enumerate() {
            let layer = self.doc.get_page(*page).get_layer(*layer_idx);
            layer.set_fill_color(Color::Rgb(Rgb::new(
                self.theme.muted.r as f32,
                self.theme.muted.g as f32,
                self.theme.muted.b as f32,
                None,
            )));

            layer.use_text(PRODUCT_NAME, 8.0, Mm(MARGIN_LEFT as f32), Mm(FOOTER_Y as f32), &self.font);

            let stamp = format!("Generated {}", generated_stamp);
            let stamp_x = (PAGE_WIDTH - text_width_mm(&stamp, 8.0)) / 2.0;
            layer.use_text(&stamp, 8.0, Mm(stamp_x as f32), Mm(FOOTER_Y as f32), &self.font);

            let page_label = format!("Page {} of {}", i + 1, total);
            let label_x = PAGE_WIDTH - MARGIN_RIGHT - text_width_mm(&page_label, 8.0);
            layer.use_text(&page_label, 8.0, Mm(label_x as f32), Mm(FOOTER_Y as f32), &self.font);
        }
    }
}

// ==========================================
// 文本度量与折行 (Helvetica 平均字宽近似)
// ==========================================

/// 1pt = 0.3528mm, Helvetica 平均字宽约 0.5 字号
const MM_PER_PT: f64 = 0.3528;
const AVG_CHAR_FACTOR: f64 = 0.5;

fn text_width_mm(text: &str, size_pt: f64) -> f64 {
    text.chars().count() as f64 * size_pt * AVG_CHAR_FACTOR * MM_PER_PT
}

/// 贪心按词折行
fn wrap_text(text: &str, max_width_mm: f64, size_pt: f64) -> Vec<String> {
    let char_width = size_pt * AVG_CHAR_FACTOR * MM_PER_PT;
    let max_chars = ((max_width_mm / char_width) as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
