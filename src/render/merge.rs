use docx_rs::Docx;

/// Concatenates filled document instances into one document, in input order.
///
/// The first instance is the base; each subsequent instance's top-level body
/// elements are appended onto the base body, preserving internal element
/// order. Nothing is interleaved, deduplicated, or reconciled across
/// instances; the base document's section configuration applies to the
/// merged tail, a known cosmetic limitation.
pub fn merge(instances: Vec<Docx>) -> Option<Docx> {
    let mut iter = instances.into_iter();
    let mut base = iter.next()?;
    for instance in iter {
        base.document.children.extend(instance.document.children);
    }
    Some(base)
}
