/*!
# Default Triage: Information-Theoretic Kernel

All logarithms are base 2; `0 * log2(0)` is treated as `0` throughout rather
than raising or propagating `NaN`.
*/

use crate::Occurrences;



/// # Range Sum.
///
/// Sum the histogram mass for occurrence values in `[lo, hi]`.
pub(crate) fn csum(h: &crate::Histogram, lo: u64, hi: u64) -> u64 {
	h.iter()
		.filter(|&(&i, _)| lo <= i && i <= hi)
		.map(|(_, &n)| n)
		.sum()
}

/// # Label Entropy `H(Y)`.
///
/// Zero when either class is empty, otherwise the binary entropy of the
/// failing/passing split.
pub(crate) fn entropy(nf: u64, np: u64) -> f64 {
	if nf == 0 || np == 0 { return 0.0; }
	let n = (nf + np) as f64;
	let pf = nf as f64 / n;
	let pp = np as f64 / n;
	-(pf * pf.log2() + pp * pp.log2())
}

/// # Unthresholded Mutual Information `MI(b)`.
///
/// Used only to rank candidate blocks before a threshold is chosen.
pub(crate) fn mutual_info(occ: &Occurrences, b: &str, hy: f64, n: u64) -> f64 {
	let m = occ.m(b);
	let c = occ.c(b);
	let cf = occ.cf(b);
	let cp = occ.cp(b);
	let n = n as f64;

	let mut acc = 0.0;
	for i in 0..=m {
		let ci = c.get(&i).copied().unwrap_or(0);
		if ci == 0 { continue; }
		let cfi = cf.get(&i).copied().unwrap_or(0);
		let cpi = cp.get(&i).copied().unwrap_or(0);

		let pf = cfi as f64 / ci as f64;
		let pp = cpi as f64 / ci as f64;

		let fi = if pf > 0.0 { cfi as f64 * pf.log2() } else { 0.0 };
		let pi = if pp > 0.0 { cpi as f64 * pp.log2() } else { 0.0 };

		acc += (fi + pi) / n;
	}

	hy + acc
}

/// # Conditional Entropy Below a Threshold.
fn cond_entropy_below(occ: &Occurrences, b: &str, n: u64, thd: u64) -> f64 {
	let sum_c = csum(occ.c(b), 0, thd);
	if sum_c == 0 { return 0.0; }

	let sum_cf = csum(occ.cf(b), 0, thd);
	let sum_cp = csum(occ.cp(b), 0, thd);
	let qf = sum_cf as f64 / sum_c as f64;
	let qp = sum_cp as f64 / sum_c as f64;

	let factor_f = if sum_cf > 0 { sum_cf as f64 * qf.log2() } else { 0.0 };
	let factor_p = if sum_cp > 0 { sum_cp as f64 * qp.log2() } else { 0.0 };

	-(factor_f + factor_p) / n as f64
}

/// # Conditional Entropy Above a Threshold.
fn cond_entropy_above(occ: &Occurrences, b: &str, n: u64, thd: u64) -> f64 {
	let m = occ.m(b);
	let sum_c = csum(occ.c(b), thd + 1, m);
	if sum_c == 0 { return 0.0; }

	let sum_cf = csum(occ.cf(b), thd + 1, m);
	let sum_cp = csum(occ.cp(b), thd + 1, m);
	let qf = sum_cf as f64 / sum_c as f64;
	let qp = sum_cp as f64 / sum_c as f64;

	let factor_f = if sum_cf > 0 { sum_cf as f64 * qf.log2() } else { 0.0 };
	let factor_p = if sum_cp > 0 { sum_cp as f64 * qp.log2() } else { 0.0 };

	-(factor_f + factor_p) / n as f64
}

/// # Thresholded Mutual Information `MI(b, thd)`.
pub(crate) fn mutual_info_thd(occ: &Occurrences, b: &str, n: u64, hy: f64, thd: u64) -> f64 {
	hy - cond_entropy_below(occ, b, n, thd) - cond_entropy_above(occ, b, n, thd)
}

/// # Optimal Threshold `thd̂(b)`.
///
/// Searches the keys of `c[b]` restricted to `0 <= thd < m(b)` in ascending
/// order and returns the first maximiser of `MI(b, thd)`. Ascending order
/// makes the tie-break deterministic.
pub(crate) fn optimal_threshold(occ: &Occurrences, b: &str, n: u64, hy: f64) -> u64 {
	let m = occ.m(b);
	let mut candidates: Vec<u64> = occ.c(b).keys().copied().filter(|&k| k < m).collect();
	candidates.sort_unstable();

	let mut best_thd = 0;
	let mut best_mi = f64::NEG_INFINITY;
	for thd in candidates {
		let mi = mutual_info_thd(occ, b, n, hy, thd);
		if mi > best_mi {
			best_mi = mi;
			best_thd = thd;
		}
	}

	best_thd
}

/// # Crash-Polarity Test.
///
/// A block is "crashing" at a given threshold iff the region above the
/// threshold is at least as common among failing traces as among passing
/// ones.
pub(crate) fn is_crashing(occ: &Occurrences, b: &str, nf: u64, np: u64, thd: u64) -> bool {
	let m = occ.m(b);
	let sf = csum(occ.cf(b), thd + 1, m) as f64 / nf as f64;
	let sp = csum(occ.cp(b), thd + 1, m) as f64 / np as f64;
	sf >= sp
}



#[cfg(test)]
mod test {
	use super::*;
	use crate::Trace;

	fn trace(pairs: &[(&str, u64)]) -> Trace {
		pairs.iter().map(|&(k, v)| (Box::from(k), v)).collect()
	}

	#[test]
	fn t_entropy_bounds() {
		assert_eq!(entropy(0, 5), 0.0);
		assert_eq!(entropy(5, 0), 0.0);
		assert!((entropy(5, 5) - 1.0).abs() < 1e-9);
		assert!((0.0..=1.0).contains(&entropy(3, 7)));
	}

	#[test]
	fn t_perfect_discriminator() {
		// S2: block "A" is present with count 3 in every failing trace and
		// absent (0) from the passing trace — a clean split at thd=0.
		let f1 = trace(&[("A", 3), ("B", 1)]);
		let f2 = trace(&[("A", 3), ("C", 2)]);
		let p1 = trace(&[("A", 0), ("B", 1), ("C", 1)]);
		let failing = [&f1, &f2];
		let passing = [&p1];
		let occ = Occurrences::build(&failing, &passing);

		let nf = 2;
		let np = 1;
		let n = nf + np;
		let hy = entropy(nf, np);

		let mi = mutual_info(&occ, "A", hy, n);
		assert!(mi >= -1e-9, "MI should be non-negative: {mi}");

		let thd = optimal_threshold(&occ, "A", n, hy);
		assert_eq!(thd, 0);
		assert!(is_crashing(&occ, "A", nf, np, thd));
	}

	#[test]
	fn t_threshold_range() {
		let f1 = trace(&[("Z", 7)]);
		let f2 = trace(&[("Z", 7)]);
		let p1 = trace(&[("Z", 0)]);
		let failing = [&f1, &f2];
		let passing = [&p1];
		let occ = Occurrences::build(&failing, &passing);

		let hy = entropy(2, 1);
		let thd = optimal_threshold(&occ, "Z", 3, hy);
		assert!(thd < occ.m("Z"));
	}
}
