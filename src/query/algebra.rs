//! Sorted, deduplicated posting-list set algebra: the three operations a
//! boolean query tree bottoms out in.

/// Sort-merge intersection (AND) of two sorted, deduplicated id lists.
pub fn intersect(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }
    result
}

/// Sort-merge union (OR) of two sorted, deduplicated id lists.
pub fn union(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut result = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        if i >= a.len() {
            result.push(b[j]);
            j += 1;
        } else if j >= b.len() {
            result.push(a[i]);
            i += 1;
        } else if a[i] < b[j] {
            result.push(a[i]);
            i += 1;
        } else if a[i] > b[j] {
            result.push(b[j]);
            j += 1;
        } else {
            result.push(a[i]);
            i += 1;
            j += 1;
        }
    }
    result
}

/// Complement (NOT) of a sorted, deduplicated id list within `0..total_docs`.
pub fn complement(list: &[u32], total_docs: u32) -> Vec<u32> {
    let mut result = Vec::new();
    let mut list_idx = 0;
    for doc_id in 0..total_docs {
        while list_idx < list.len() && list[list_idx] < doc_id {
            list_idx += 1;
        }
        if list_idx >= list.len() || list[list_idx] != doc_id {
            result.push(doc_id);
        }
    }
    result
}
