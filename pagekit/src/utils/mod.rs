//! Index bookkeeping and PDF object-graph helpers.

use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

/// Sort and de-duplicate `indices`, highest first.
///
/// Removing pages in this order never shifts an index that is still
/// waiting to be removed.
pub fn descending(indices: &[usize]) -> Vec<usize> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.reverse();
    sorted
}

/// Collect every object reachable from `obj` into `into`.
///
/// `Parent` links are not followed; they lead back into the page tree and
/// would drag the whole document along with a single page. Objects already
/// present in `into` are not visited again.
pub fn collect_references(source: &Document, obj: &Object, into: &mut BTreeMap<ObjectId, Object>) {
    match obj {
        Object::Reference(ref_id) => {
            if !into.contains_key(ref_id)
                && let Ok(referenced_obj) = source.get_object(*ref_id)
            {
                into.insert(*ref_id, referenced_obj.clone());
                collect_references(source, referenced_obj, into);
            }
        }
        Object::Dictionary(dict) => {
            for (key, value) in dict.iter() {
                if key.as_slice() != b"Parent" {
                    collect_references(source, value, into);
                }
            }
        }
        Object::Array(arr) => {
            for item in arr {
                collect_references(source, item, into);
            }
        }
        Object::Stream(stream) => {
            for (key, value) in stream.dict.iter() {
                if key.as_slice() != b"Parent" {
                    collect_references(source, value, into);
                }
            }
        }
        _ => {}
    }
}

/// Rewrite references through `mapping`.
///
/// References with no entry in `mapping` point outside the copied graph and
/// are replaced by `null`.
pub fn remap_references(obj: &mut Object, mapping: &BTreeMap<ObjectId, ObjectId>) {
    match obj {
        Object::Reference(id) => {
            *obj = match mapping.get(id) {
                Some(new_id) => Object::Reference(*new_id),
                None => Object::Null,
            };
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                remap_references(value, mapping);
            }
        }
        Object::Array(arr) => {
            for item in arr.iter_mut() {
                remap_references(item, mapping);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                remap_references(value, mapping);
            }
        }
        _ => {}
    }
}
