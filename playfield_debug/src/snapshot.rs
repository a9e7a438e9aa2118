// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshots of a layer tree.
//!
//! The snapshot reads local properties only, so it reflects what hit testing
//! sees even when the tree has not been evaluated since the last change.

use playfield_core::layer::{LayerId, LayerStore};
use serde_json::{Map, Value, json};

use crate::export::layer_key;

/// Returns `root` and its descendants as nested JSON objects.
///
/// Each object has the layer's key, local transform coefficients, origin,
/// alpha, flags, whether it has a listener and content, the bounding box of
/// its hit shape (if any), and its `children` in paint order.
///
/// # Panics
///
/// Panics if `root` is stale.
#[must_use]
pub fn layer_tree(store: &LayerStore, root: LayerId) -> Value {
    let flags = store.flags(root);
    let origin = store.origin(root);
    let mut node = Map::new();
    node.insert("layer".into(), json!(layer_key(root)));
    node.insert("transform".into(), json!(store.local_transform(root).coeffs));
    node.insert("origin".into(), json!([origin.x, origin.y]));
    node.insert("alpha".into(), json!(store.alpha(root)));
    node.insert("visible".into(), json!(flags.visible));
    node.insert("interactive".into(), json!(flags.interactive));
    node.insert("listener".into(), json!(store.has_listener(root)));
    if let Some(content) = store.content(root) {
        node.insert("content".into(), json!(content.0));
    }
    if let Some(shape) = store.hit_shape(root) {
        let b = shape.bounding_box();
        node.insert("hit_bounds".into(), json!([b.x0, b.y0, b.x1, b.y1]));
    }
    let children: Vec<Value> = store
        .children(root)
        .map(|child| layer_tree(store, child))
        .collect();
    node.insert("children".into(), Value::Array(children));
    Value::Object(node)
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use playfield_core::layer::{HitShape, SurfaceId};

    use super::*;

    #[test]
    fn snapshot_nests_children_in_paint_order() {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        let a = store.create_layer();
        let b = store.create_layer();
        store.add_child(root, a);
        store.add_child(root, b);
        store.set_origin(b, Point::new(2.0, 3.0));
        store.set_content(b, Some(SurfaceId(9)));
        store.set_hit_shape(b, Some(HitShape::sized(4.0, 5.0)));
        store.set_interactive(b, true);

        let tree = layer_tree(&store, root);
        let children = tree["children"].as_array().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0]["layer"], layer_key(a));
        assert_eq!(children[1]["origin"], json!([2.0, 3.0]));
        assert_eq!(children[1]["content"], 9);
        assert_eq!(children[1]["hit_bounds"], json!([0.0, 0.0, 4.0, 5.0]));
        assert_eq!(children[1]["interactive"], true);
        assert!(children[0].get("content").is_none());
    }
}
