use super::auc_roc::compute_tps_fps_by_threshold;

#[derive(Debug, std::cmp::PartialEq)]
pub struct PrecisionRecallCurvePoint {
	/// The classification threshold.
	pub threshold: f32,
	/// The precision for all predictions with probability >= threshold.
	pub precision: f32,
	/// The recall for all predictions with probability >= threshold.
	pub recall: f32,
}

/// This function computes the precision-recall curve, which plots the recall on the x axis and the precision on the y axis for each classification threshold. The labels are 1-based, where 2 is the positive class.
pub fn compute_precision_recall_curve(
	probabilities: &[f32],
	labels: &[usize],
) -> Vec<PrecisionRecallCurvePoint> {
	let mut tps_fps = compute_tps_fps_by_threshold(probabilities, labels);
	for i in 1..tps_fps.len() {
		tps_fps[i].true_positives += tps_fps[i - 1].true_positives;
		tps_fps[i].false_positives += tps_fps[i - 1].false_positives;
	}
	let count_positives = labels
		.iter()
		.map(|l| l.checked_sub(1).unwrap())
		.sum::<usize>();
	// add a point at (recall 0, precision 1) with a dummy threshold of 1.0, mirroring the leading point of the roc curve
	let mut precision_recall_curve = vec![PrecisionRecallCurvePoint {
		threshold: 1.0,
		precision: 1.0,
		recall: 0.0,
	}];
	tps_fps.iter().for_each(|tps_fps_point| {
		let n_predicted_positive = tps_fps_point.true_positives + tps_fps_point.false_positives;
		precision_recall_curve.push(PrecisionRecallCurvePoint {
			threshold: tps_fps_point.threshold,
			precision: tps_fps_point.true_positives as f32 / n_predicted_positive as f32,
			recall: tps_fps_point.true_positives as f32 / count_positives as f32,
		})
	});
	precision_recall_curve
}

#[test]
fn test_precision_recall_curve() {
	let labels = vec![2, 2, 1, 1];
	let probabilities = vec![0.9, 0.4, 0.4, 0.2];
	let left = compute_precision_recall_curve(probabilities.as_slice(), labels.as_slice());
	let right = vec![
		PrecisionRecallCurvePoint {
			threshold: 1.0,
			precision: 1.0,
			recall: 0.0,
		},
		PrecisionRecallCurvePoint {
			threshold: 0.9,
			precision: 1.0,
			recall: 0.5,
		},
		PrecisionRecallCurvePoint {
			threshold: 0.4,
			precision: 2.0 / 3.0,
			recall: 1.0,
		},
		PrecisionRecallCurvePoint {
			threshold: 0.2,
			precision: 0.5,
			recall: 1.0,
		},
	];
	left.iter()
		.zip(right.iter())
		.for_each(|(left, right)| assert_eq!(left, right));
}
