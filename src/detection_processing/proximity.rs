use crate::common::Detection;

/// Drops detections whose center sits within `min_seal_distance` of an already accepted one.
///
/// Greedy and order dependent: candidates are visited in their current order, so the caller
/// decides priority (after NMS that is descending confidence). A candidate must be strictly
/// farther than `min_seal_distance` from every accepted center to be kept.
pub fn dedup_by_proximity(detections: Vec<Detection>, min_seal_distance: f32) -> Vec<Detection> {
    let mut accepted: Vec<Detection> = Vec::with_capacity(detections.len());
    for candidate in detections {
        let far_enough = accepted
            .iter()
            .all(|kept| kept.bbox.center_distance(&candidate.bbox) > min_seal_distance);
        if far_enough {
            accepted.push(candidate);
        } else {
            log::trace!("Dropping seal at ({:.1}, {:.1}) as a near duplicate", candidate.bbox.cx(), candidate.bbox.cy());
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SealBox;

    fn det(cx: f32, cy: f32, conf: f32) -> Detection {
        Detection::new(0, SealBox::from_cxcywh(cx, cy, 40., 40.), None, conf)
    }

    #[test]
    fn close_centers_collapse_to_one() {
        let out = dedup_by_proximity(vec![det(100., 100., 0.9), det(130., 140., 0.8)], 60.);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].confidence, 0.9);
    }

    #[test]
    fn distant_centers_both_survive() {
        let out = dedup_by_proximity(vec![det(100., 100., 0.9), det(200., 100., 0.8)], 60.);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn distance_equal_to_minimum_is_a_duplicate() {
        let out = dedup_by_proximity(vec![det(0., 0., 0.9), det(30., 40., 0.8)], 50.);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn chain_result_depends_on_order() {
        // a-b and b-c are close, a-c is not
        let a = det(0., 0., 0.9);
        let b = det(40., 0., 0.8);
        let c = det(80., 0., 0.7);
        let abc = dedup_by_proximity(vec![a.clone(), b.clone(), c.clone()], 50.);
        assert_eq!(abc.len(), 2);
        let bac = dedup_by_proximity(vec![b, a, c], 50.);
        assert_eq!(bac.len(), 1);
    }

    #[test]
    fn zero_distance_only_drops_coincident_centers() {
        let out = dedup_by_proximity(vec![det(5., 5., 0.9), det(5., 5., 0.8), det(6., 5., 0.7)], 0.);
        assert_eq!(out.len(), 2);
    }
}
