use ndarray::{s, ArrayView2, Axis, Ix2};
use rayon::prelude::*;
use crate::common::{OutputLayout, SealBox};
use crate::data::{RawDetection, X};
use crate::error::SealError;
use crate::Result;

/// Box fields at the start of every candidate row: cx, cy, w, h.
const BOX_FIELDS: usize = 4;

/// Turns the raw model output into candidates whose best class score reaches `conf_threshold`.
///
/// The confidence filter lives here so it always runs before NMS. Candidates keep the
/// row order of the output table.
pub fn decode(output: &X, layout: OutputLayout, conf_threshold: f32) -> Result<Vec<RawDetection>> {
    let table = candidate_table(output, layout)?;
    let fields = table.ncols();
    if fields <= BOX_FIELDS {
        return Err(SealError::inference(format!(
            "expected at least {} fields per candidate, got {}",
            BOX_FIELDS + 1,
            fields
        )));
    }

    let detections = table
        .axis_iter(Axis(0))
        .into_par_iter()
        .filter_map(|row| {
            let (class_id, max_score) = best_class(row.slice(s![BOX_FIELDS..]).iter().copied())?;

            // filtering low scores
            if max_score < conf_threshold {
                return None;
            }

            let bbox = SealBox::from_cxcywh(row[0], row[1], row[2], row[3]);
            Some(RawDetection::new(bbox, max_score, class_id))
        })
        .collect::<Vec<_>>();

    Ok(detections)
}

/// Views the output as one row per candidate, dropping leading unit axes.
fn candidate_table(output: &X, layout: OutputLayout) -> Result<ArrayView2<'_, f32>> {
    let mut view = output.view();
    while view.ndim() > 2 && view.shape()[0] == 1 {
        view = view.index_axis_move(Axis(0), 0);
    }
    let table = view.into_dimensionality::<Ix2>().map_err(|_| {
        SealError::inference(format!("unexpected output shape {:?}", output.shape()))
    })?;

    Ok(match layout {
        OutputLayout::AttributesFirst => table.reversed_axes(),
        OutputLayout::CandidatesFirst => table,
    })
}

/// Index and value of the highest score; the earliest class wins a tie.
fn best_class(scores: impl Iterator<Item = f32>) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, score) in scores.enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if score <= b => {}
            _ => best = Some((i, score)),
        }
    }
    best
}
