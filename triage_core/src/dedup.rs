/*!
# Default Triage: Greedy Deduplication Loop

This is the heart of the engine: repeatedly pick the block whose occurrence
distribution carries the most information about the crash label, binarise it
at the threshold that maximises that information, and claim every failing
trace above the threshold as one group. What's left is re-analysed against
the unchanged passing corpus on the next iteration.
*/

use crate::{
	Narrator,
	Occurrences,
	TraceSet,
	info,
};
use std::path::PathBuf;



/// # One Emitted Group.
///
/// The identifiers of the failing traces claimed together, in emission
/// order across the run.
pub type Group = Vec<PathBuf>;

/// # A Ranked Candidate Block.
struct Candidate<'a> {
	/// # Block Name.
	b: &'a str,
	/// # Unthresholded Mutual Information.
	mi: f64,
}

/// # Run the Greedy Deduplication Loop.
///
/// Consumes `failing`; `passing` is read-only throughout the run. Returns
/// the ordered list of groups. Never errors: degenerate inputs (e.g. empty
/// corpora) simply produce zero groups.
pub(crate) fn deduplicate(mut failing: TraceSet, passing: &TraceSet, narrator: &mut Narrator) -> Vec<Group> {
	let mut groups: Vec<Group> = Vec::new();
	let mut prev_nf: u64 = u64::MAX;

	while !failing.is_empty() && !passing.is_empty() {
		let nf = failing.len() as u64;
		let np = passing.len() as u64;

		// Stagnation guard: no progress was made last time around, so stop
		// digging and hand back everything that's left as one final group.
		if prev_nf <= nf {
			narrator.warn("deduplication stagnated; emitting remaining failing traces as one group");
			groups.push(failing.into_keys().collect());
			break;
		}
		prev_nf = nf;

		let fvals: Vec<&crate::Trace> = failing.values().collect();
		let pvals: Vec<&crate::Trace> = passing.values().collect();
		let occ = Occurrences::build(&fvals, &pvals);
		let n = nf + np;
		let hy = info::entropy(nf, np);

		// Rank every candidate block by its unthresholded MI, descending.
		let mut candidates: Vec<Candidate> = occ.blocks()
			.map(|b| Candidate { b, mi: info::mutual_info(&occ, b, hy, n) })
			.collect();
		candidates.sort_unstable_by(|a, b| b.mi.total_cmp(&a.mi));

		// Select the first candidate, in descending-MI order, whose optimal
		// threshold also passes the crash-polarity test.
		let mut selected: Option<(&str, u64)> = None;
		for cand in &candidates {
			let thd = info::optimal_threshold(&occ, cand.b, n, hy);
			if info::is_crashing(&occ, cand.b, nf, np, thd) {
				selected = Some((cand.b, thd));
				break;
			}
		}

		let Some((best_b, best_thd)) = selected else {
			// No discriminator this round; loop again and let the
			// stagnation guard above end things next time.
			narrator.warn("no discriminating block passed the crash-polarity test this iteration");
			continue;
		};

		let s = info::csum(occ.cf(best_b), 0, best_thd);
		if s == 0 {
			// The block is present above threshold in every current
			// failing trace: nothing left to split further.
			groups.push(failing.into_keys().collect());
			break;
		}

		let (claimed, remaining): (TraceSet, TraceSet) = failing.into_iter()
			.partition(|(_, t)| t.get(best_b).copied().unwrap_or(0) > best_thd);
		failing = remaining;
		narrator.info(&format!(
			"group {}: {} traces via block {best_b} @ thd={best_thd}",
			groups.len(), claimed.len(),
		));
		groups.push(claimed.into_keys().collect());
	}

	groups
}



#[cfg(test)]
mod test {
	use super::*;

	fn trace(pairs: &[(&str, u64)]) -> crate::Trace {
		pairs.iter().map(|&(k, v)| (Box::from(k), v)).collect()
	}

	fn set(pairs: &[(&str, crate::Trace)]) -> TraceSet {
		pairs.iter().cloned().map(|(k, v)| (PathBuf::from(k), v)).collect()
	}

	#[test]
	fn t_s1_empty_corpora_yields_no_groups() {
		let mut n = Narrator::stderr_only();
		let groups = deduplicate(TraceSet::new(), &TraceSet::new(), &mut n);
		assert!(groups.is_empty());
	}

	#[test]
	fn t_s3_two_bugs_one_block_each() {
		let failing = set(&[
			("f1", trace(&[("X", 5)])),
			("f2", trace(&[("X", 5)])),
			("f3", trace(&[("Y", 4)])),
			("f4", trace(&[("Y", 4)])),
		]);
		let passing = set(&[("p1", trace(&[]))]);

		let mut n = Narrator::stderr_only();
		let groups = deduplicate(failing, &passing, &mut n);

		assert_eq!(groups.len(), 2);
		let mut all: Vec<PathBuf> = groups.iter().flatten().cloned().collect();
		all.sort();
		assert_eq!(all, vec![
			PathBuf::from("f1"), PathBuf::from("f2"),
			PathBuf::from("f3"), PathBuf::from("f4"),
		]);
		for g in &groups {
			assert_eq!(g.len(), 2);
		}
	}

	#[test]
	fn t_s4_stagnation_emits_one_group() {
		let failing = set(&[
			("f1", trace(&[("A", 1)])),
			("f2", trace(&[("B", 1)])),
		]);
		let passing = set(&[("p1", trace(&[("A", 1), ("B", 1)]))]);

		let mut n = Narrator::stderr_only();
		let groups = deduplicate(failing, &passing, &mut n);

		assert_eq!(groups.len(), 1);
		let mut g = groups[0].clone();
		g.sort();
		assert_eq!(g, vec![PathBuf::from("f1"), PathBuf::from("f2")]);
	}

	#[test]
	fn t_s5_all_failing_block_short_circuits() {
		let failing = set(&[
			("f1", trace(&[("Z", 7)])),
			("f2", trace(&[("Z", 7)])),
		]);
		let passing = set(&[("p1", trace(&[("Z", 0)]))]);

		let mut n = Narrator::stderr_only();
		let groups = deduplicate(failing, &passing, &mut n);

		assert_eq!(groups.len(), 1);
		let mut g = groups[0].clone();
		g.sort();
		assert_eq!(g, vec![PathBuf::from("f1"), PathBuf::from("f2")]);
	}

	#[test]
	fn t_partition_covers_all_failing_identifiers() {
		let failing = set(&[
			("f1", trace(&[("X", 5)])),
			("f2", trace(&[("X", 5)])),
			("f3", trace(&[("Y", 4)])),
			("f4", trace(&[("Y", 4)])),
		]);
		let original: Vec<PathBuf> = failing.keys().cloned().collect();
		let passing = set(&[("p1", trace(&[]))]);

		let mut n = Narrator::stderr_only();
		let groups = deduplicate(failing, &passing, &mut n);

		let mut emitted: Vec<PathBuf> = groups.into_iter().flatten().collect();
		emitted.sort();
		let mut original = original;
		original.sort();
		assert_eq!(emitted, original);
	}
}
