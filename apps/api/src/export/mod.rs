//! PDF export: renders the optimized resume text into a paginated A4
//! document. One-way: nothing ever parses these files back.
//!
//! Layout: Helvetica 10pt, 20mm left/top margins, 170mm text width, 5mm line
//! height, automatic page break once the cursor passes 280mm. Wrapping is a
//! greedy word-wrap over a static Helvetica width table (AFM widths in em);
//! CPU-bound rendering runs inside `tokio::task::spawn_blocking`.

pub mod handlers;

use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_LEFT_MM: f32 = 20.0;
const TOP_MM: f32 = 20.0;
const TEXT_WIDTH_MM: f32 = 170.0;
const LINE_HEIGHT_MM: f32 = 5.0;
const PAGE_BREAK_MM: f32 = 280.0;
const FONT_SIZE_PT: f32 = 10.0;
const PT_PER_MM: f32 = 72.0 / 25.4;

// A4 in PostScript points.
const PAGE_WIDTH_PT: f32 = 595.28;
const PAGE_HEIGHT_PT: f32 = 841.89;

/// Helvetica AFM character widths in em units (AFM value / 1000), covering
/// ASCII 0x20..=0x7E. Index = (char as usize) - 32.
#[rustfmt::skip]
static HELVETICA_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0      1      2      3      4      5      6      7      8      9
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // :      ;      <      =      >      ?      @
    0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // [      \      ]      ^      _      `
    0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
    // {      |      }      ~
    0.334, 0.260, 0.334, 0.584,
];

/// Fallback width for non-ASCII characters.
const AVERAGE_CHAR_WIDTH_EM: f32 = 0.556;

/// Measures the rendered width of a string in millimetres at the export
/// font size.
fn measure_mm(s: &str) -> f32 {
    let em: f32 = s
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[code - 32]
            } else {
                AVERAGE_CHAR_WIDTH_EM
            }
        })
        .sum();
    em * FONT_SIZE_PT / PT_PER_MM
}

/// Greedy word-wrap of a single paragraph to the text width. An empty
/// paragraph yields one empty printed line (vertical space is preserved).
fn wrap_line(paragraph: &str, max_width_mm: f32) -> Vec<String> {
    let words: Vec<&str> = paragraph.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }

    let space_mm = measure_mm(" ");
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in words {
        let word_mm = measure_mm(word);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_mm;
        } else if current_width + space_mm + word_mm > max_width_mm {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_mm;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_mm + word_mm;
        }
    }
    lines.push(current);
    lines
}

/// Splits the full text into printed lines: hard newlines are respected,
/// overlong paragraphs wrap.
fn layout_lines(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|paragraph| wrap_line(paragraph, TEXT_WIDTH_MM))
        .collect()
}

/// Distributes printed lines over pages with the export cursor rules:
/// start at 20mm, advance 5mm per line, break to a fresh page once the
/// cursor would pass 280mm.
fn paginate(lines: Vec<String>) -> Vec<Vec<String>> {
    let mut pages: Vec<Vec<String>> = vec![Vec::new()];
    let mut y_mm = TOP_MM;
    for line in lines {
        if y_mm > PAGE_BREAK_MM {
            pages.push(Vec::new());
            y_mm = TOP_MM;
        }
        pages.last_mut().expect("pages is never empty").push(line);
        y_mm += LINE_HEIGHT_MM;
    }
    pages
}

/// Renders the text into PDF bytes.
pub fn render_pdf(text: &str) -> Result<Vec<u8>> {
    let pages = paginate(layout_lines(text));

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page_lines in &pages {
        let mut operations: Vec<Operation> = Vec::new();
        let mut y_mm = TOP_MM;
        for line in page_lines {
            if !line.is_empty() {
                let x_pt = MARGIN_LEFT_MM * PT_PER_MM;
                let y_pt = (PAGE_HEIGHT_MM - y_mm) * PT_PER_MM;
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec!["F1".into(), Object::Real(FONT_SIZE_PT)],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![Object::Real(x_pt), Object::Real(y_pt)],
                ));
                operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
                operations.push(Operation::new("ET", vec![]));
            }
            y_mm += LINE_HEIGHT_MM;
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(PAGE_WIDTH_PT),
                Object::Real(PAGE_HEIGHT_PT),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
