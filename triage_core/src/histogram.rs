/*!
# Default Triage: Occurrence Histograms
*/

use ahash::{
	AHashMap,
	AHashSet,
};
use crate::Trace;



/// # Occurrence Histogram.
///
/// Maps an occurrence count `i` to the number of traces in which a block
/// occurred exactly `i` times. Absent keys implicitly mean zero; nothing
/// here ever mutates on a missed lookup.
pub type Histogram = AHashMap<u64, u64>;



/// # Occurrence Distributions.
///
/// For every basic block seen in the current failing-or-passing trace set,
/// this holds three histograms — combined (`c`), failing-only (`cf`), and
/// passing-only (`cp`) — plus the cached maximum occurrence count `m(b)`
/// used throughout the information-theoretic kernel.
pub struct Occurrences {
	/// # Combined Histograms.
	c: AHashMap<Box<str>, Histogram>,

	/// # Failing Histograms.
	cf: AHashMap<Box<str>, Histogram>,

	/// # Passing Histograms.
	cp: AHashMap<Box<str>, Histogram>,

	/// # Maximum Occurrence Count, Per Block.
	m: AHashMap<Box<str>, u64>,
}

impl Occurrences {
	/// # Build From the Current Failing/Passing Traces.
	///
	/// Recomputes the block universe and all three histograms from scratch;
	/// this is the hot loop of each deduplication iteration.
	pub fn build(failing: &[&Trace], passing: &[&Trace]) -> Self {
		let mut universe: AHashSet<&str> = AHashSet::default();
		for t in failing.iter().chain(passing.iter()) {
			universe.extend(t.keys().map(|b| b.as_ref()));
		}

		let mut c: AHashMap<Box<str>, Histogram> = AHashMap::with_capacity(universe.len());
		let mut cf: AHashMap<Box<str>, Histogram> = AHashMap::with_capacity(universe.len());
		let mut cp: AHashMap<Box<str>, Histogram> = AHashMap::with_capacity(universe.len());
		for &b in &universe {
			c.insert(Box::from(b), Histogram::default());
			cf.insert(Box::from(b), Histogram::default());
			cp.insert(Box::from(b), Histogram::default());
		}

		for t in failing {
			for &b in &universe {
				let n = t.get(b).copied().unwrap_or(0);
				*c.get_mut(b).unwrap().entry(n).or_insert(0) += 1;
				*cf.get_mut(b).unwrap().entry(n).or_insert(0) += 1;
			}
		}
		for t in passing {
			for &b in &universe {
				let n = t.get(b).copied().unwrap_or(0);
				*c.get_mut(b).unwrap().entry(n).or_insert(0) += 1;
				*cp.get_mut(b).unwrap().entry(n).or_insert(0) += 1;
			}
		}

		let m = c.iter()
			.map(|(b, h)| (b.clone(), h.keys().copied().max().unwrap_or(0)))
			.collect();

		Self { c, cf, cp, m }
	}

	/// # Iterate the Block Universe.
	pub fn blocks(&self) -> impl Iterator<Item = &str> {
		self.c.keys().map(Box::as_ref)
	}

	/// # Combined Histogram for a Block.
	pub fn c(&self, b: &str) -> &Histogram { &self.c[b] }

	/// # Failing Histogram for a Block.
	pub fn cf(&self, b: &str) -> &Histogram { &self.cf[b] }

	/// # Passing Histogram for a Block.
	pub fn cp(&self, b: &str) -> &Histogram { &self.cp[b] }

	/// # `m(b)`: Maximum Occurrence Count for a Block.
	pub fn m(&self, b: &str) -> u64 { self.m[b] }

	/// # Number of Distinct Blocks.
	pub fn len(&self) -> usize { self.c.len() }

	/// # Are There Any Blocks At All?
	pub fn is_empty(&self) -> bool { self.c.is_empty() }
}
