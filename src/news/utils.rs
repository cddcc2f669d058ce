use crate::error::ParseError;
use crate::types::Sel;
use scraper::{ElementRef, Html, Selector};

pub(super) fn compile(sel: &Sel) -> Result<Selector, ParseError> {
    Selector::parse(&sel.0).map_err(|e| ParseError::InvalidSelector {
        selector: sel.0.clone(),
        message: e.to_string(),
    })
}

/// Text content of `el` with runs of whitespace collapsed to one space.
pub(super) fn text_of(el: &ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(super) fn first_child_element<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.children().find_map(ElementRef::wrap)
}

pub(super) fn select_first<'a>(doc: &'a Html, sel: &Sel) -> Result<ElementRef<'a>, ParseError> {
    let selector = compile(sel)?;
    doc.select(&selector)
        .next()
        .ok_or_else(|| ParseError::MissingNode {
            selector: sel.0.clone(),
        })
}
