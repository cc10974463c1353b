//! 评估报告 PDF 渲染
//!
//! 使用内置 Helvetica 字体在 A4 页面上排版，整份文档渲染到内存后返回。

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use crate::errors::{EvalSystemError, Result};
use crate::models::evaluations::responses::{EvaluationReport, ReportQuestion, ReportSection};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 20.0;
const MARGIN_LEFT: f32 = 15.0;
const MARGIN_RIGHT: f32 = 15.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;
const LINE_HEIGHT: f32 = 5.0;
const ROW_PADDING: f32 = 2.0;
const SECTION_SPACING: f32 = 8.0;

// 报告头部取值列的横向位置
const COL_HEADER_VALUE: f32 = MARGIN_LEFT + 32.0;

// 表格列的横向位置
const COL_NO: f32 = MARGIN_LEFT;
const COL_QUESTION: f32 = 27.0;
const COL_ANSWER: f32 = 120.0;
const COL_SCORE: f32 = 180.0;

// 按平均字宽估算的每列可容纳字符数
const QUESTION_CHARS: usize = 50;
const ANSWER_CHARS: usize = 32;
const HEADER_VALUE_CHARS: usize = 78;

/// 1pt = 0.3528mm
const PT_TO_MM: f32 = 0.3528;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// 页面游标：记录当前纵坐标，空间不足时自动换页
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl<'a> PageCursor<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            y: PAGE_HEIGHT - MARGIN_TOP,
            pages: 1,
        }
    }

    /// 确保剩余空间足够容纳 height，否则开新页
    fn reserve(&mut self, height: f32) {
        if self.y - height < MARGIN_BOTTOM {
            self.pages += 1;
            let (page, layer) = self.doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Layer {}", self.pages),
            );
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN_TOP;
        }
    }

    fn advance(&mut self, height: f32) {
        self.y -= height;
    }

    fn text(&self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn rule(&self, x1: f32, x2: f32, y: f32, thickness: f32, gray: f32) {
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(gray, gray, gray, None)));
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y)), false),
                (Point::new(Mm(x2), Mm(y)), false),
            ],
            is_closed: false,
        });
    }
}

/// 估算文本宽度（mm）
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5 * PT_TO_MM
}

/// 按字符数折行，超长单词强制截断
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        // 单词本身超过一行
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) if score.fract() == 0.0 => format!("{score:.0}"),
        Some(score) => format!("{score:.2}"),
        None => "-".to_string(),
    }
}

fn draw_title(cursor: &mut PageCursor<'_>, fonts: &Fonts, title: &str) {
    cursor.reserve(TITLE_SIZE * PT_TO_MM + LINE_HEIGHT);
    let width = text_width(title, TITLE_SIZE);
    let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN_LEFT);
    cursor.text(title, TITLE_SIZE, x, &fonts.bold);
    cursor.rule(x, (x + width).min(PAGE_WIDTH - MARGIN_RIGHT), cursor.y - 1.5, 0.6, 0.0);
    cursor.advance(TITLE_SIZE * PT_TO_MM + LINE_HEIGHT);
}

/// 报告头部的标签与按列宽折行后的取值
fn header_rows(report: &EvaluationReport) -> [(&'static str, Vec<String>); 5] {
    let major = match &report.major_name {
        Some(name) => format!("{name} (ID {})", report.major_id),
        None => format!("ID {}", report.major_id),
    };
    let setup = report
        .setup_name
        .clone()
        .unwrap_or_else(|| format!("ID {}", report.setup_id));

    [
        ("Evaluation ID", report.id.to_string()),
        ("Semester", report.semester.clone()),
        ("End Date", report.end_date.format("%d %B %Y").to_string()),
        ("Major", major),
        ("Setup", setup),
    ]
    .map(|(label, value)| (label, wrap_text(&value, HEADER_VALUE_CHARS)))
}

fn draw_header(cursor: &mut PageCursor<'_>, fonts: &Fonts, report: &EvaluationReport) {
    for (label, lines) in header_rows(report) {
        cursor.reserve(LINE_HEIGHT);
        cursor.text(&format!("{label}:"), BODY_SIZE, MARGIN_LEFT, &fonts.bold);
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                cursor.advance(LINE_HEIGHT);
                cursor.reserve(LINE_HEIGHT);
            }
            cursor.text(line, BODY_SIZE, COL_HEADER_VALUE, &fonts.regular);
        }
        cursor.advance(LINE_HEIGHT);
    }
    cursor.advance(SECTION_SPACING);
}

fn draw_table_header(cursor: &mut PageCursor<'_>, fonts: &Fonts) {
    cursor.reserve(LINE_HEIGHT + ROW_PADDING);
    for (label, x) in [
        ("No.", COL_NO),
        ("Question", COL_QUESTION),
        ("Answer", COL_ANSWER),
        ("Score", COL_SCORE),
    ] {
        cursor.text(label, BODY_SIZE, x, &fonts.bold);
    }
    cursor.rule(
        MARGIN_LEFT,
        PAGE_WIDTH - MARGIN_RIGHT,
        cursor.y - ROW_PADDING,
        0.5,
        0.0,
    );
    cursor.advance(LINE_HEIGHT + ROW_PADDING);
}

fn draw_question(
    cursor: &mut PageCursor<'_>,
    fonts: &Fonts,
    index: usize,
    question: &ReportQuestion,
) {
    let question_lines = wrap_text(&question.text, QUESTION_CHARS);
    let answer_lines = match question.answer.as_deref() {
        Some(answer) if !answer.trim().is_empty() => wrap_text(answer, ANSWER_CHARS),
        _ => vec!["-".to_string()],
    };
    let line_count = question_lines.len().max(answer_lines.len());
    let row_height = line_count as f32 * LINE_HEIGHT + ROW_PADDING;

    // 行高超过一整页时逐行换页
    cursor.reserve(row_height.min(PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM));

    cursor.text(&index.to_string(), BODY_SIZE, COL_NO, &fonts.regular);
    cursor.text(&format_score(question.score), BODY_SIZE, COL_SCORE, &fonts.regular);

    for line in 0..line_count {
        if line > 0 {
            cursor.advance(LINE_HEIGHT);
            cursor.reserve(LINE_HEIGHT);
        }
        if let Some(text) = question_lines.get(line) {
            cursor.text(text, BODY_SIZE, COL_QUESTION, &fonts.regular);
        }
        if let Some(text) = answer_lines.get(line) {
            cursor.text(text, BODY_SIZE, COL_ANSWER, &fonts.regular);
        }
    }

    cursor.rule(
        MARGIN_LEFT,
        PAGE_WIDTH - MARGIN_RIGHT,
        cursor.y - ROW_PADDING,
        0.2,
        0.6,
    );
    cursor.advance(LINE_HEIGHT + ROW_PADDING);
}

fn draw_section(cursor: &mut PageCursor<'_>, fonts: &Fonts, section: &ReportSection) {
    let heading = format!("Section {}: {}", section.sequence, section.name);

    // 标题与表头保持在同一页
    cursor.reserve(HEADING_SIZE * PT_TO_MM + 2.0 * LINE_HEIGHT + ROW_PADDING);
    cursor.text(&heading, HEADING_SIZE, MARGIN_LEFT, &fonts.bold);
    let width = text_width(&heading, HEADING_SIZE).min(PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT);
    cursor.rule(MARGIN_LEFT, MARGIN_LEFT + width, cursor.y - 1.2, 0.4, 0.0);
    cursor.advance(HEADING_SIZE * PT_TO_MM + LINE_HEIGHT);

    draw_table_header(cursor, fonts);

    for (index, question) in section.questions.iter().enumerate() {
        draw_question(cursor, fonts, index + 1, question);
    }

    cursor.advance(SECTION_SPACING);
}

/// 将评估报告渲染为 PDF 字节
pub fn render_evaluation_report(report: &EvaluationReport, title: &str) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        format!("{title} #{}", report.id),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| EvalSystemError::report_render(format!("加载字体失败: {e:?}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| EvalSystemError::report_render(format!("加载字体失败: {e:?}")))?,
    };

    let first_layer = doc.get_page(page).get_layer(layer);
    let mut cursor = PageCursor::new(&doc, first_layer);

    draw_title(&mut cursor, &fonts, title);
    draw_header(&mut cursor, &fonts, report);

    for section in &report.sections {
        draw_section(&mut cursor, &fonts, section);
    }

    doc.save_to_bytes()
        .map_err(|e| EvalSystemError::report_render(format!("生成 PDF 失败: {e:?}")))
}
