/*!
# Default Triage: Ground-Truth Scoring

Scores an emitted partition against a labelled reference. The *bug label*
of a trace is the name of its immediate parent directory — an external
convention, opaque to everything else in this crate.
*/

use ahash::AHashMap;
use crate::dedup::Group;
use serde::Serialize;
use std::path::Path;



/// # Scoring Result.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
	/// # Number of Emitted Clusters.
	pub num_clusters: usize,
	/// # Bug Labels Spread Across More Than One Cluster.
	pub num_overcount: usize,
	/// # Clusters Containing More Than One Distinct Bug Label.
	pub num_undercount: usize,
	/// # Bug Labels With No Cluster They Own Purely.
	pub num_completely_lost: usize,
	/// # Purity.
	pub purity: f64,
	/// # Inverse Purity.
	pub inverse_purity: f64,
	/// # F-Measure.
	pub f_measure: f64,
	#[serde(skip)]
	/// # The Lost Bug Labels Themselves, in First-Seen Order.
	pub lost: Vec<String>,
	#[serde(skip)]
	/// # Human-Readable Overcounting Notices, One Per Affected Bug Label.
	pub overcount_notices: Vec<String>,
	#[serde(skip)]
	/// # Human-Readable Undercounting Notices, One Per Affected Cluster.
	pub undercount_notices: Vec<String>,
}

/// # Derive a Bug Label From a Trace Identifier.
///
/// The convention is the identifier's immediate parent directory name; if
/// there is none (a bare filename with no parent), the identifier's own
/// display form is used as a fallback label.
fn bug_label(id: &Path) -> String {
	id.parent()
		.and_then(|p| p.file_name())
		.map_or_else(|| id.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// # Score a Partition Against Ground Truth.
///
/// `round_to_percent` matches the upstream default of reporting purity,
/// inverse purity, and F-measure as integer percentages (`round(100·x)`)
/// rather than raw five-decimal fractions.
pub(crate) fn analyze(groups: &[Group], round_to_percent: bool) -> ScoreReport {
	// bug_cluster[bug][cluster] = count of traces with that label in that
	// cluster; built straight from (cluster_list, bug_list) pairs.
	let mut bug_cluster: AHashMap<String, AHashMap<usize, u64>> = AHashMap::default();
	let mut bug_first_seen: Vec<String> = Vec::new();

	let n: u64 = groups.iter().map(|g| g.len() as u64).sum();

	for (cluster, group) in groups.iter().enumerate() {
		for id in group {
			let label = bug_label(id);
			let counts = bug_cluster.entry(label.clone()).or_insert_with(|| {
				bug_first_seen.push(label.clone());
				AHashMap::default()
			});
			*counts.entry(cluster).or_insert(0) += 1;
		}
	}

	let cluster_size = |c: usize| -> u64 {
		bug_cluster.values().map(|m| m.get(&c).copied().unwrap_or(0)).sum()
	};
	let bug_size = |b: &str| -> u64 { bug_cluster[b].values().sum() };

	let purity = if n == 0 { 0.0 } else {
		let mut acc = 0.0;
		for c in 0..groups.len() {
			let size_c = cluster_size(c);
			if size_c == 0 { continue; }
			let best = bug_cluster.values()
				.map(|m| m.get(&c).copied().unwrap_or(0))
				.max()
				.unwrap_or(0);
			acc += size_c as f64 * (best as f64 / size_c as f64);
		}
		acc / n as f64
	};

	let inverse_purity = if n == 0 { 0.0 } else {
		let mut acc = 0.0;
		for (label, counts) in &bug_cluster {
			let size_b = bug_size(label);
			if size_b == 0 { continue; }
			let best = counts.values().copied().max().unwrap_or(0);
			acc += size_b as f64 * (best as f64 / size_b as f64);
		}
		acc / n as f64
	};

	let f_measure = if n == 0 { 0.0 } else {
		let mut acc = 0.0;
		for (label, counts) in &bug_cluster {
			let size_b = bug_size(label) as f64;
			if size_b == 0.0 { continue; }
			let best_f = counts.iter()
				.map(|(&c, &overlap)| {
					let size_c = cluster_size(c) as f64;
					let p = overlap as f64 / size_b;
					let r = overlap as f64 / size_c;
					if p == 0.0 && r == 0.0 { 0.0 } else { 2.0 * p * r / (p + r) }
				})
				.fold(0.0_f64, f64::max);
			acc += size_b * best_f;
		}
		acc / n as f64
	};

	let overcount_notices: Vec<String> = bug_first_seen.iter()
		.filter(|label| bug_cluster[label.as_str()].len() > 1)
		.map(|label| format!(
			"Overcounting bug_type {label}: present in {} clusters.",
			bug_cluster[label.as_str()].len(),
		))
		.collect();
	let num_overcount = overcount_notices.len();

	let undercount_notices: Vec<String> = (0..groups.len())
		.filter_map(|c| {
			let bugs: Vec<&str> = bug_first_seen.iter()
				.filter(|label| bug_cluster[label.as_str()].get(&c).copied().unwrap_or(0) > 0)
				.map(String::as_str)
				.collect();
			if bugs.len() > 1 {
				let list = bugs.iter().map(|b| format!("'{b}'")).collect::<Vec<_>>().join(", ");
				Some(format!("Undercounting present at cluster {c}: [{list}]"))
			}
			else { None }
		})
		.collect();
	let num_undercount = undercount_notices.len();

	let lost: Vec<String> = bug_first_seen.into_iter()
		.filter(|label| {
			let counts = &bug_cluster[label];
			counts.keys().all(|&c| {
				bug_cluster.iter().any(|(other, m)| other != label && m.get(&c).copied().unwrap_or(0) > 0)
			})
		})
		.collect();

	let round5 = |x: f64| (x * 100_000.0).round() / 100_000.0;
	let to_pct = |x: f64| decimal_to_int_percentage(x);

	let (purity, inverse_purity, f_measure) = if round_to_percent {
		(to_pct(round5(purity)), to_pct(round5(inverse_purity)), to_pct(round5(f_measure)))
	}
	else {
		(round5(purity), round5(inverse_purity), round5(f_measure))
	};

	ScoreReport {
		num_clusters: groups.len(),
		num_overcount,
		num_undercount,
		num_completely_lost: lost.len(),
		purity,
		inverse_purity,
		f_measure,
		lost,
		overcount_notices,
		undercount_notices,
	}
}

/// # Convert a `[0, 1]` Fraction to an Integer Percentage.
///
/// Uses `int(100*x + 0.5)` rounding rather than banker's rounding, matching
/// the reference behaviour exactly at the `x.5` boundary.
fn decimal_to_int_percentage(x: f64) -> f64 {
	(100.0 * x + 0.5).floor()
}
