//! Attribute reduction with document-order style delta tracking

use crate::dom::{ElementNode, Node};
use crate::error::Result;
use crate::syntax::extract::computed_styles;
use crate::syntax::filter::is_style_or_link;
use crate::syntax::resolver::StyleResolver;
use crate::syntax::style::{STYLE_SPECS, StyleDelta};

/// Original attributes that survive reduction
pub const RETAINED_ATTRIBUTES: [&str; 4] = ["name", "content", "alt", "href"];

/// Reduce every element below `body` in pre-order, returning how many were visited.
///
/// `delta` carries the last emitted value of each style from one element to the
/// next in traversal order, regardless of nesting. `style` and `link` elements
/// are left untouched; they are stripped once the traversal is done.
pub fn reduce_attributes<R>(body: &mut ElementNode, resolver: &R, delta: &mut StyleDelta) -> Result<usize>
where
    R: StyleResolver + ?Sized,
{
    let mut visited = 0;
    reduce_children(&mut body.children, resolver, delta, &mut visited)?;
    Ok(visited)
}

fn reduce_children<R>(children: &mut [Node], resolver: &R, delta: &mut StyleDelta, visited: &mut usize) -> Result<()>
where
    R: StyleResolver + ?Sized,
{
    for element in children.iter_mut().filter_map(Node::as_element_mut) {
        if is_style_or_link(element) {
            continue;
        }

        reduce_element(element, resolver, delta)?;
        *visited += 1;
        reduce_children(&mut element.children, resolver, delta, visited)?;
    }
    Ok(())
}

/// Replace the attributes of a single element with its changed style values
pub fn reduce_element<R>(element: &mut ElementNode, resolver: &R, delta: &mut StyleDelta) -> Result<()>
where
    R: StyleResolver + ?Sized,
{
    // Styles are resolved before the element loses its class and style attributes
    let styles = computed_styles(element, resolver)?;

    element.retain_attributes(|name| RETAINED_ATTRIBUTES.contains(&name));

    for spec in &STYLE_SPECS {
        let Some(value) = styles.get(spec.key) else {
            continue;
        };

        if delta.should_emit(spec.key, value) {
            element.set_attribute(spec.short_attribute, value);
            delta.record(spec.key, value);
        }
    }

    Ok(())
}
