use anyhow::Context;
use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::{
    snapshot_error::SnapshotError,
    text_manipulators::{extract_text, extract_xml_payload, extract_xml_text, parse_coordinate},
};

/// A `<text>` element of the rendered timetable.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub text: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// A `<rect>` element of the rendered timetable, with the tooltip of its
/// nested `<title>` if it has one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RectNode {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fill: Option<String>,
    pub title: Option<String>,
}

/// Everything captured from one rendered view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub texts: Vec<TextNode>,
    pub rects: Vec<RectNode>,
}

impl Snapshot {
    /// Reads the first `<svg>` of a standalone SVG (or XHTML) document.
    pub fn from_svg(svg: &str) -> anyhow::Result<Self> {
        let document =
            roxmltree::Document::parse(svg).context("failed to parse SVG snapshot")?;
        let Some(svg_root) = document
            .descendants()
            .find(|node| is_element(node, "svg"))
        else {
            return Err(SnapshotError::new("no <svg> element in snapshot").into());
        };

        let texts = svg_root
            .descendants()
            .filter(|node| is_element(node, "text"))
            .map(|node| TextNode {
                text: extract_xml_text(node),
                x: parse_coordinate(node.attribute("x")),
                y: parse_coordinate(node.attribute("y")),
            })
            .collect::<Vec<_>>();

        let rects = svg_root
            .descendants()
            .filter(|node| is_element(node, "rect"))
            .map(|node| RectNode {
                x: parse_coordinate(node.attribute("x")),
                y: parse_coordinate(node.attribute("y")),
                width: parse_coordinate(node.attribute("width")),
                height: parse_coordinate(node.attribute("height")),
                fill: node.attribute("fill").map(String::from),
                title: node
                    .descendants()
                    .find(|child| is_element(child, "title"))
                    .map(extract_xml_payload),
            })
            .collect::<Vec<_>>();

        debug!(
            "Captured {} text nodes and {} rects from SVG",
            texts.len(),
            rects.len()
        );
        Ok(Self { texts, rects })
    }

    /// Reads the first inline `<svg>` of a rendered HTML page.
    pub fn from_html(html: &str) -> anyhow::Result<Self> {
        let document = Html::parse_document(html);
        let svg_selector = parse_selector("svg")?;
        let text_selector = parse_selector("text")?;
        let rect_selector = parse_selector("rect")?;
        let title_selector = parse_selector("title")?;

        let Some(svg_root) = document.select(&svg_selector).next() else {
            return Err(SnapshotError::new("no <svg> element in page").into());
        };

        let texts = svg_root
            .select(&text_selector)
            .map(|node| TextNode {
                text: extract_text(node),
                x: parse_coordinate(node.value().attr("x")),
                y: parse_coordinate(node.value().attr("y")),
            })
            .collect::<Vec<_>>();

        let rects = svg_root
            .select(&rect_selector)
            .map(|node| RectNode {
                x: parse_coordinate(node.value().attr("x")),
                y: parse_coordinate(node.value().attr("y")),
                width: parse_coordinate(node.value().attr("width")),
                height: parse_coordinate(node.value().attr("height")),
                fill: node.value().attr("fill").map(String::from),
                title: node
                    .select(&title_selector)
                    .next()
                    .map(|title: ElementRef| title.text().collect::<String>()),
            })
            .collect::<Vec<_>>();

        debug!(
            "Captured {} text nodes and {} rects from HTML",
            texts.len(),
            rects.len()
        );
        Ok(Self { texts, rects })
    }
}

fn is_element(node: &roxmltree::Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn parse_selector(selector: &str) -> anyhow::Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow::anyhow!("invalid selector {selector}: {e:?}"))
}
