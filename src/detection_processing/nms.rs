/// Anything that can take part in non-maximum suppression.
pub trait Nms {
    fn iou(&self, other: &Self) -> f32;
    fn confidence(&self) -> f32;
}

/// Greedy non-maximum suppression over the whole candidate set, class agnostic.
///
/// Candidates are sorted by descending confidence with a stable sort, so on equal scores the
/// earlier candidate is kept. A candidate is dropped when its IoU with an already kept one
/// exceeds `iou_threshold`. Survivors stay in descending-confidence order.
pub fn nms<T: Nms>(boxes: &mut Vec<T>, iou_threshold: f32) {
    boxes.sort_by(|b1, b2| b2.confidence().total_cmp(&b1.confidence()));
    let mut current_index = 0;
    for index in 0..boxes.len() {
        let mut drop = false;
        for prev_index in 0..current_index {
            let iou = boxes[prev_index].iou(&boxes[index]);
            if iou > iou_threshold {
                drop = true;
                break;
            }
        }
        if !drop {
            boxes.swap(current_index, index);
            current_index += 1;
        }
    }
    boxes.truncate(current_index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SealBox;
    use crate::data::RawDetection;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn raw(x: f32, y: f32, w: f32, h: f32, conf: f32) -> RawDetection {
        RawDetection::new(SealBox::from_ltwh(x, y, w, h), conf, 0)
    }

    #[test]
    fn identical_boxes_keep_the_higher_score() {
        let mut boxes = vec![raw(10., 10., 50., 50., 0.75), raw(10., 10., 50., 50., 0.9)];
        nms(&mut boxes, 0.45);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].confidence, 0.9);
    }

    #[test]
    fn equal_scores_keep_the_earlier_candidate() {
        let mut boxes = vec![
            RawDetection::new(SealBox::from_ltwh(0., 0., 10., 10.), 0.8, 7),
            RawDetection::new(SealBox::from_ltwh(1., 1., 10., 10.), 0.8, 3),
        ];
        nms(&mut boxes, 0.45);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].class_id, 7);
    }

    #[test]
    fn different_classes_still_suppress_each_other() {
        let mut boxes = vec![
            RawDetection::new(SealBox::from_ltwh(0., 0., 10., 10.), 0.9, 0),
            RawDetection::new(SealBox::from_ltwh(0., 0., 10., 10.), 0.8, 1),
        ];
        nms(&mut boxes, 0.45);
        assert_eq!(boxes.len(), 1);
    }

    #[test]
    fn overlap_at_threshold_is_kept() {
        // IoU of exactly 0.5
        let mut boxes = vec![raw(0., 0., 10., 10., 0.9), raw(0., 0., 10., 5., 0.8)];
        nms(&mut boxes, 0.5);
        assert_eq!(boxes.len(), 2);
        nms(&mut boxes, 0.49);
        assert_eq!(boxes.len(), 1);
    }

    #[test]
    fn output_is_sorted_by_descending_score() {
        let mut boxes = vec![
            raw(0., 0., 10., 10., 0.71),
            raw(100., 0., 10., 10., 0.95),
            raw(200., 0., 10., 10., 0.8),
        ];
        nms(&mut boxes, 0.45);
        let scores: Vec<f32> = boxes.iter().map(|b| b.confidence).collect();
        assert_eq!(scores, vec![0.95, 0.8, 0.71]);
    }

    #[test]
    fn running_twice_changes_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut boxes: Vec<RawDetection> = (0..40)
                .map(|_| {
                    raw(
                        rng.gen_range(0.0..200.0),
                        rng.gen_range(0.0..200.0),
                        rng.gen_range(5.0..60.0),
                        rng.gen_range(5.0..60.0),
                        rng.gen_range(0.0..1.0),
                    )
                })
                .collect();
            nms(&mut boxes, 0.45);
            let once = boxes.clone();
            nms(&mut boxes, 0.45);
            assert_eq!(once, boxes);
        }
    }
}
