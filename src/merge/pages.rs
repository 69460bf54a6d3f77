//! Page tree concatenation.
//!
//! A fresh Catalog and Pages root are created for the merged document and
//! every source page is re-parented onto that root, in source order. Pages
//! keep their own dictionaries and content streams. Attributes a page
//! inherited from intermediate nodes of its original page tree are copied
//! onto the page first, since those nodes are dropped.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::error::Result;

/// Page attributes that may be inherited from ancestor `Pages` nodes.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on page tree depth, guards against `Parent` cycles.
const MAX_TREE_DEPTH: usize = 64;

/// Concatenate `sources` into a new document, pages in source order.
///
/// The resulting document has exactly the pages of each source, one block
/// per source, in the order the sources are given. Objects that are no longer
/// reachable (the sources' own catalogs and page tree nodes) are pruned.
pub fn concatenate(sources: Vec<Document>) -> Result<Document> {
    let version = sources
        .iter()
        .map(|doc| doc.version.as_str())
        .max()
        .unwrap_or("1.5")
        .to_string();

    let mut merged = Document::with_version(version);
    let pages_id = merged.new_object_id();
    let mut max_id = merged.max_id;
    let mut kids: Vec<Object> = Vec::new();

    for mut doc in sources {
        flatten_inherited_attributes(&mut doc)?;

        // Avoid object id collisions with everything merged so far
        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        merged.objects.extend(doc.objects);

        for page_id in page_ids {
            merged
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)?
                .set("Parent", Object::Reference(pages_id));
            kids.push(Object::Reference(page_id));
        }
    }

    merged.max_id = max_id;

    let count = kids.len() as i64;
    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => Object::Name(b"Pages".to_vec()),
            "Kids" => kids,
            "Count" => Object::Integer(count),
        }),
    );

    let catalog_id = merged.add_object(dictionary! {
        "Type" => Object::Name(b"Catalog".to_vec()),
        "Pages" => Object::Reference(pages_id),
    });
    merged.trailer.set("Root", Object::Reference(catalog_id));

    merged.prune_objects();
    merged.renumber_objects();
    merged.compress();

    Ok(merged)
}

/// Copy inheritable attributes from ancestor nodes onto every page.
///
/// Attributes the page defines itself win over inherited ones, and the
/// nearest ancestor wins over farther ones.
pub fn flatten_inherited_attributes(doc: &mut Document) -> Result<()> {
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

    for page_id in page_ids {
        let inherited = inherited_attributes(doc, page_id)?;
        if inherited.is_empty() {
            continue;
        }

        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }

    Ok(())
}

fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Result<Vec<(Vec<u8>, Object)>> {
    let page = doc.get_dictionary(page_id)?;

    let mut missing: Vec<&[u8]> = INHERITABLE_ATTRIBUTES
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut inherited = Vec::new();
    let mut parent = parent_of(page);
    let mut depth = 0;

    while let Some(parent_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }

        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };

        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });

        parent = parent_of(node);
        depth += 1;
    }

    Ok(inherited)
}

fn parent_of(node: &Dictionary) -> Option<ObjectId> {
    node.get(b"Parent").and_then(Object::as_reference).ok()
}
