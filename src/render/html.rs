//! HTML fragments for rendered sections.

use crate::render::block::{Block, Element};

/// Render one block as an HTML element
pub fn block_to_html(block: &Block) -> String {
    let (tag, inline) = match block {
        Block::Heading3(inline) => ("h3", inline),
        Block::Heading4(inline) => ("h4", inline),
        Block::BulletItem(inline) => ("li", inline),
        Block::Paragraph(inline) => ("p", inline),
    };
    format!("<{tag}>{}</{tag}>", inline.to_html())
}

/// Render laid-out elements, one per line, lists as `<ul>`
pub fn elements_to_html(elements: &[Element]) -> String {
    let mut parts = Vec::with_capacity(elements.len());

    for element in elements {
        match element {
            Element::Block(block) => parts.push(block_to_html(block)),
            Element::List(items) => {
                parts.push("<ul>".to_string());
                parts.extend(items.iter().map(|item| format!("<li>{}</li>", item.to_html())));
                parts.push("</ul>".to_string());
            }
        }
    }

    parts.join("\n")
}
