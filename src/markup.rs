//! Allow-list rebuild of vector preview markup before it is injected as live DOM.

use roxmltree::{Document, Node, NodeType, ParsingOptions};

use crate::error::AppError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

const ALLOWED_ELEMENTS: &[&str] = &[
    "svg",
    "g",
    "defs",
    "symbol",
    "use",
    "title",
    "desc",
    "metadata",
    "path",
    "rect",
    "circle",
    "ellipse",
    "line",
    "polyline",
    "polygon",
    "text",
    "tspan",
    "image",
    "clipPath",
    "mask",
    "pattern",
    "linearGradient",
    "radialGradient",
    "stop",
    "style",
];

// Attributes carrying URLs; everything else is plain data once `on*` handlers are gone.
const URL_ATTRIBUTES: &[&str] = &["href", "src"];

/// Rebuild `markup` keeping only static SVG content.
///
/// Drops scripts, `foreignObject`, unknown elements, event-handler attributes and any
/// link that is not an in-document fragment or an inline raster image.
pub fn sanitize_svg(markup: &str) -> Result<String, AppError> {
    let trimmed = markup.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(trimmed, options)
        .map_err(|e| AppError::Markup(e.to_string()))?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(AppError::Markup(format!(
            "expected <svg> root, found <{}>",
            root.tag_name().name()
        )));
    }
    let mut out = String::with_capacity(trimmed.len());
    write_element(root, true, &mut out);
    Ok(out)
}

fn element_allowed(node: Node<'_, '_>) -> bool {
    let name = node.tag_name();
    matches!(name.namespace(), None | Some(SVG_NS)) && ALLOWED_ELEMENTS.contains(&name.name())
}

fn url_allowed(value: &str) -> bool {
    let v = value.trim_start().to_ascii_lowercase();
    v.starts_with('#') || v.starts_with("data:image/png") || v.starts_with("data:image/jpeg")
        || v.starts_with("data:image/gif") || v.starts_with("data:image/webp")
}

fn style_allowed(value: &str) -> bool {
    let v = value.to_ascii_lowercase();
    !(v.contains("javascript:") || v.contains("expression(") || v.contains("@import"))
        && !(v.contains("url(") && !v.contains("url(#"))
}

fn write_element(node: Node<'_, '_>, is_root: bool, out: &mut String) {
    if !element_allowed(node) {
        return;
    }
    let name = node.tag_name().name();
    out.push('<');
    out.push_str(name);
    if is_root {
        out.push_str(" xmlns=\"");
        out.push_str(SVG_NS);
        out.push('"');
        if node.descendants().any(|n| {
            n.attributes().any(|a| a.namespace() == Some(XLINK_NS))
        }) {
            out.push_str(" xmlns:xlink=\"");
            out.push_str(XLINK_NS);
            out.push('"');
        }
    }
    for attr in node.attributes() {
        let local = attr.name();
        if local.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("on")) {
            continue;
        }
        let prefix = match attr.namespace() {
            None => "",
            Some(XLINK_NS) => "xlink:",
            Some(XML_NS) => "xml:",
            Some(_) => continue,
        };
        if URL_ATTRIBUTES.contains(&local) && !url_allowed(attr.value()) {
            continue;
        }
        if local == "style" && !style_allowed(attr.value()) {
            continue;
        }
        out.push(' ');
        out.push_str(prefix);
        out.push_str(local);
        out.push_str("=\"");
        out.push_str(&htmlize::escape_attribute(attr.value()));
        out.push('"');
    }
    out.push('>');
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => write_element(child, false, out),
            NodeType::Text => {
                if name == "style" && !style_allowed(child.text().unwrap_or_default()) {
                    continue;
                }
                out.push_str(&htmlize::escape_text(child.text().unwrap_or_default()));
            }
            _ => {}
        }
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
