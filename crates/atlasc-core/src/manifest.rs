//! Manifest writer — emits the packed atlas's single JSON description.

use serde_json::{json, Value};

use crate::model::AtlasRecord;

/// Builds the manifest JSON value for `atlas`. `image_name` is the basename
/// of the sibling PNG file.
pub fn to_manifest_json(atlas: &AtlasRecord, image_name: &str) -> Value {
    let sprites: Vec<Value> = atlas
        .sprites
        .iter()
        .map(|s| {
            let mut obj = json!({
                "name": s.name,
                "size": [s.size.0, s.size.1],
                "sprite_rect": s.sprite_rect.as_xyxy(),
                "sheet_rect": s.sheet_rect.as_xyxy(),
            });
            if let Some(mesh) = &s.mesh {
                if mesh.num_tris() > 0 {
                    let positions: Vec<[i32; 2]> =
                        mesh.positions.iter().map(|p| [p.x, p.y]).collect();
                    let uvs: Vec<[i32; 2]> = mesh.uvs.iter().map(|p| [p.x, p.y]).collect();
                    obj["mesh"] = json!({
                        "num_tris": mesh.num_tris(),
                        "num_vertices": mesh.num_vertices(),
                        "indices": mesh.indices,
                        "positions": positions,
                        "uvs": uvs,
                    });
                }
            }
            obj
        })
        .collect();

    json!({
        "image": image_name,
        "image_width": atlas.width,
        "image_height": atlas.height,
        "sprites": sprites,
    })
}
