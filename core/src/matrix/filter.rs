//! In-place removal of sites and samples.

use super::{SampleView, SiteView, VariantMatrix};

impl VariantMatrix {
    /// Retains only the sites for which the predicate returns `true`.
    ///
    /// The predicate is evaluated once for each site in order before any data is moved, so it
    /// always sees the matrix as it was before the call. Retained sites keep their relative order,
    /// and their positions are kept in step.
    ///
    /// # Examples
    ///
    /// ```
    /// use msstats_core::VariantMatrix;
    ///
    /// let mut matrix = VariantMatrix::new(vec![0, 1, 1, 0, 0, 0, 0, 1], vec![0.1, 0.2]).unwrap();
    /// matrix.retain_sites(|site| site.iter().filter(|&x| x == 1).count() == 1);
    ///
    /// assert_eq!(matrix.nsites(), 1);
    /// assert_eq!(matrix.positions(), &[0.2]);
    /// ```
    pub fn retain_sites<F>(&mut self, mut f: F)
    where
        F: FnMut(SiteView<'_>) -> bool,
    {
        let keep = self.iter_sites().map(&mut f).collect::<Vec<_>>();
        let before = keep.len();
        let nsam = self.nsam;

        let mut kept = 0;
        for i in (0..before).filter(|&i| keep[i]) {
            if kept != i {
                self.data.copy_within(i * nsam..(i + 1) * nsam, kept * nsam);
                self.positions[kept] = self.positions[i];
            }
            kept += 1;
        }

        self.data.truncate(kept * nsam);
        self.positions.truncate(kept);

        log::debug!("Retained {kept} of {before} sites");
    }

    /// Retains only the samples for which the predicate returns `true`.
    ///
    /// The predicate is evaluated once for each sample in order before any data is moved. Sites
    /// and positions are unchanged.
    pub fn retain_samples<F>(&mut self, mut f: F)
    where
        F: FnMut(SampleView<'_>) -> bool,
    {
        let keep = self.iter_samples().map(&mut f).collect::<Vec<_>>();
        let before = keep.len();
        let kept = keep.iter().filter(|&&keep| keep).count();

        if kept < before {
            // Writes never overtake reads, so compaction can happen in place
            let mut write = 0;
            for read in 0..self.data.len() {
                if keep[read % before] {
                    self.data[write] = self.data[read];
                    write += 1;
                }
            }
            self.data.truncate(write);
            self.nsam = kept;
        }

        log::debug!("Retained {kept} of {before} samples");
    }
}

/// Removes the sites of a matrix for which the predicate returns `false`.
///
/// See [`VariantMatrix::retain_sites`].
pub fn filter_sites<F>(matrix: &mut VariantMatrix, f: F)
where
    F: FnMut(SiteView<'_>) -> bool,
{
    matrix.retain_sites(f)
}

/// Removes the samples of a matrix for which the predicate returns `false`.
///
/// See [`VariantMatrix::retain_samples`].
pub fn filter_samples<F>(matrix: &mut VariantMatrix, f: F)
where
    F: FnMut(SampleView<'_>) -> bool,
{
    matrix.retain_samples(f)
}
