//! Orchestrator — drives every stage in order and owns every intermediate
//! buffer for the scope of one build.

use std::path::Path;

use image::RgbaImage;
use tracing::{debug, instrument, warn};

use crate::bounds;
use crate::canvas;
use crate::compositing;
use crate::config::AtlasConfig;
use crate::correct;
use crate::error::{AtlasError, Result};
use crate::mask;
use crate::model::{AtlasRecord, Mesh, Rect, SpriteRecord};
use crate::outline;
use crate::packer;
use crate::simplify;
use crate::triangulate;
use crate::uv;

/// One decoded input image, paired with the unix-style path recorded in the
/// manifest.
pub struct Input {
    pub name: String,
    pub image: RgbaImage,
}

/// Loads and decodes one input file. `InputNotFound` is raised before any
/// decoding is attempted, so a batch of missing paths is reported before any
/// work is wasted decoding the ones that do exist.
pub fn load_input(path: &Path, name: impl Into<String>) -> Result<Input> {
    if !path.is_file() {
        return Err(AtlasError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let image = image::open(path)
        .map_err(|source| AtlasError::InputDecodeFailed {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    Ok(Input {
        name: name.into(),
        image,
    })
}

/// The fully built atlas: its manifest-ready record and the RGBA canvas to
/// be written out as PNG.
pub struct AtlasBuildOutput {
    pub record: AtlasRecord,
    pub canvas: RgbaImage,
}

struct SpritePrep {
    name: String,
    image: RgbaImage,
    sprite_rect: Rect,
    mesh: Option<Mesh>,
}

/// Runs the whole sprite-to-atlas pipeline: per sprite, mask -> outline ->
/// trim bounds, optionally simplify -> correct -> triangulate; then batch
/// pack -> size canvas -> resolve UVs -> composite, returning the manifest
/// record and composited canvas (JSON serialization happens separately in
/// [`crate::manifest`], kept apart from buffer assembly).
#[instrument(skip_all, fields(n = inputs.len()))]
pub fn make(inputs: Vec<Input>, cfg: &AtlasConfig) -> Result<AtlasBuildOutput> {
    cfg.validate()?;
    if inputs.is_empty() {
        return Err(AtlasError::Empty);
    }

    let preps: Vec<SpritePrep> = inputs
        .into_iter()
        .map(|input| prepare_sprite(input, cfg))
        .collect::<Result<Vec<_>>>()?;

    let inset = (cfg.border + cfg.padding) as i32;
    let sizes: Vec<(i32, i32)> = preps
        .iter()
        .map(|p| (p.sprite_rect.w + inset * 2, p.sprite_rect.h + inset * 2))
        .collect();

    let placements = packer::pack(&sizes, cfg.max_width as i32, cfg.max_height as i32)?;

    let mut packed_w = 0i32;
    let mut packed_h = 0i32;
    for p in &placements {
        packed_w = packed_w.max(p.slot.right());
        packed_h = packed_h.max(p.slot.bottom());
    }
    let (final_w, final_h) = canvas::canvas_size(packed_w as u32, packed_h as u32, cfg.pot);

    let mut canvas = RgbaImage::new(final_w, final_h);

    // Indexed by original input position so duplicate sprite names can never
    // scramble the manifest's input-order guarantee.
    let mut sprites: Vec<Option<SpriteRecord>> = (0..preps.len()).map(|_| None).collect();

    for placement in &placements {
        let prep = &preps[placement.index];
        let content_rect = Rect::new(
            placement.slot.x + inset,
            placement.slot.y + inset,
            prep.sprite_rect.w,
            prep.sprite_rect.h,
        );

        compositing::blit_rgba(
            &prep.image,
            &mut canvas,
            &prep.sprite_rect,
            (content_rect.x as u32, content_rect.y as u32),
        );

        let mesh = prep.mesh.as_ref().map(|m| {
            let uvs = uv::resolve_uvs(&m.positions, &prep.sprite_rect, &content_rect);
            Mesh {
                positions: m.positions.clone(),
                uvs,
                indices: m.indices.clone(),
            }
        });

        sprites[placement.index] = Some(SpriteRecord {
            name: prep.name.clone(),
            size: prep.image.dimensions(),
            sprite_rect: prep.sprite_rect,
            sheet_rect: content_rect,
            mesh,
        });
    }

    let sprites: Vec<SpriteRecord> = sprites
        .into_iter()
        .map(|s| s.expect("every prepared sprite is placed or the pack already failed"))
        .collect();

    let record = AtlasRecord {
        width: final_w,
        height: final_h,
        sprites,
    };
    debug!(occupancy = record.stats().occupancy(), "atlas packed");
    Ok(AtlasBuildOutput { record, canvas })
}

fn prepare_sprite(input: Input, cfg: &AtlasConfig) -> Result<SpritePrep> {
    let Input { name, image } = input;

    let thresholded = mask::build_threshold_mask(&image, cfg.alpha_threshold);
    let sprite_rect = match bounds::bounding_rect(&thresholded) {
        Some(r) => r,
        None => {
            // Fully transparent input: emit a zero-area sprite rather than
            // fail the whole build over one blank image.
            return Ok(SpritePrep {
                name,
                image,
                sprite_rect: Rect::new(0, 0, 0, 0),
                mesh: None,
            });
        }
    };

    let mesh = if cfg.mesh {
        let dilated = mask::dilate(&thresholded);
        let raw_outline = outline::trace_outline(&dilated);
        let simplified = simplify::adaptive_simplify(&raw_outline, cfg.max_verts);
        if simplified.len() < 3 {
            warn!(sprite = %name, "simplified outline has fewer than 3 vertices, skipping mesh");
            None
        } else {
            let thresholded = mask::build_threshold_mask(&image, cfg.alpha_threshold);
            let mut corrected = simplified;
            correct::correct_outline(&mut corrected, &thresholded);
            // The dilated-mask outline and the full-image-bounds offset
            // clamp above can both leave a vertex outside sprite_rect; pin
            // every vertex back into it so mesh positions honor the
            // documented "positions lie within sprite_rect" invariant.
            correct::clamp_to_rect(&mut corrected, &sprite_rect);
            let mesh = triangulate::triangulate(&corrected)?;
            if mesh.num_tris() == 0 {
                None
            } else {
                Some(mesh)
            }
        }
    } else {
        None
    };

    Ok(SpritePrep {
        name,
        image,
        sprite_rect,
        mesh,
    })
}
