//! Classic estimators from the frequency spectrum of a sample.

use serde::Serialize;

use crate::VariantMatrix;

use super::{d, theta, FrequencySpectrum, InvalidInputError, Polarity, Record, Theta, D};

/// Diversity and frequency spectrum statistics of a single sample.
#[doc(alias = "PolySIM")]
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Classic {
    /// Tajima's estimator of θ, the mean number of pairwise differences.
    pub thetapi: f64,
    /// Watterson's estimator of θ.
    pub thetaw: f64,
    /// Fay and Wu's estimator of θ.
    pub thetah: f64,
    /// Tajima's D, NaN without segregating sites.
    pub tajimasd: f64,
    /// Number of segregating sites.
    pub numpoly: usize,
    /// Number of sites where exactly one sample differs from the rest.
    pub numsingletons: usize,
    /// Number of sites where exactly one sample carries the derived call.
    pub numexternalmutations: usize,
}

impl Classic {
    /// Computes the statistics from a spectrum.
    pub fn from_spectrum(spectrum: &FrequencySpectrum) -> Self {
        Self {
            thetapi: Theta::<theta::Tajima>::from_spectrum(spectrum).0,
            thetaw: Theta::<theta::Watterson>::from_spectrum(spectrum).0,
            thetah: Theta::<theta::FayWu>::from_spectrum(spectrum).0,
            tajimasd: D::<d::Tajima>::from_spectrum(spectrum).0,
            numpoly: spectrum.segregating_sites() as usize,
            numsingletons: spectrum.singletons() as usize,
            numexternalmutations: spectrum.derived_singletons() as usize,
        }
    }

    /// Computes the statistics from the segregating sites of a matrix.
    ///
    /// The polarity decides which calls are derived. The matrix must not contain missing calls.
    ///
    /// # Examples
    ///
    /// ```
    /// use msstats_core::{stat::{Classic, Polarity}, VariantMatrix};
    ///
    /// let matrix = VariantMatrix::new(vec![0, 1, 1, 0, 0, 0, 0, 1], vec![0.1, 0.2]).unwrap();
    /// let classic = Classic::from_matrix(&matrix, &Polarity::Ancestral(0)).unwrap();
    ///
    /// assert_eq!(classic.numpoly, 2);
    /// assert_eq!(classic.numsingletons, 1);
    /// ```
    pub fn from_matrix(
        matrix: &VariantMatrix,
        polarity: &Polarity,
    ) -> Result<Self, InvalidInputError> {
        FrequencySpectrum::from_matrix(matrix, polarity)
            .map(|spectrum| Self::from_spectrum(&spectrum))
    }
}

impl From<&Classic> for Record {
    fn from(classic: &Classic) -> Self {
        Record::from_iter([
            ("thetapi", classic.thetapi),
            ("thetaw", classic.thetaw),
            ("thetah", classic.thetah),
            ("tajimasd", classic.tajimasd),
            ("numpoly", classic.numpoly as f64),
            ("numsingletons", classic.numsingletons as f64),
            ("numexternalmutations", classic.numexternalmutations as f64),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::matrix::tests::matrix;

    fn six_sites() -> VariantMatrix {
        VariantMatrix::from_sites([
            (0.1, "01010101"),
            (0.2, "01111111"),
            (0.3, "00011101"),
            (0.4, "11111000"),
            (0.5, "01010101"),
            (0.6, "00001111"),
        ])
        .unwrap()
    }

    #[test]
    fn test_classic_small() {
        let classic = Classic::from_matrix(&matrix(), &Polarity::default()).unwrap();

        assert_approx_eq!(classic.thetapi, 7.0 / 6.0);
        assert_approx_eq!(classic.thetaw, 12.0 / 11.0);
        assert_approx_eq!(classic.thetah, 5.0 / 6.0);
        assert_approx_eq!(classic.tajimasd, 0.591580);
        assert_eq!(classic.numpoly, 2);
        assert_eq!(classic.numsingletons, 1);
        assert_eq!(classic.numexternalmutations, 1);
    }

    #[test]
    fn test_classic_six_sites() {
        let classic = Classic::from_matrix(&six_sites(), &Polarity::default()).unwrap();

        assert_approx_eq!(classic.thetapi, 3.071429);
        assert_approx_eq!(classic.thetaw, 2.314050);
        assert_approx_eq!(classic.thetah, 4.928571);
        assert_approx_eq!(classic.tajimasd, 1.525663);
        assert_eq!(classic.numpoly, 6);
        assert_eq!(classic.numsingletons, 1);
        assert_eq!(classic.numexternalmutations, 0);
    }

    #[test]
    fn test_classic_unknown_polarity() {
        let classic = Classic::from_matrix(&six_sites(), &Polarity::Unknown).unwrap();
        let polarized = Classic::from_matrix(&six_sites(), &Polarity::default()).unwrap();

        assert_approx_eq!(classic.thetapi, polarized.thetapi);
        assert_eq!(classic.numsingletons, polarized.numsingletons);
        assert_eq!(classic.numexternalmutations, classic.numsingletons);
    }

    #[test]
    fn test_classic_without_segregating_sites() {
        let mut matrix = six_sites();
        matrix.retain_sites(|_| false);

        let classic = Classic::from_matrix(&matrix, &Polarity::default()).unwrap();

        assert_eq!(classic.thetaw, 0.0);
        assert_eq!(classic.thetapi, 0.0);
        assert_eq!(classic.thetah, 0.0);
        assert!(classic.tajimasd.is_nan());
        assert_eq!(classic.numpoly, 0);
    }

    #[test]
    fn test_classic_empty_matrix_prints_positive_zero() {
        let matrix = VariantMatrix::empty(4).unwrap();

        let classic = Classic::from_matrix(&matrix, &Polarity::default()).unwrap();
        let record = Record::from(&classic);

        assert!(classic.thetapi.is_sign_positive());
        assert!(classic.thetaw.is_sign_positive());
        assert!(classic.thetah.is_sign_positive());
        assert_eq!(
            format!("{record:.2}"),
            "thetapi=0.00\tthetaw=0.00\tthetah=0.00\ttajimasd=NaN\t\
            numpoly=0.00\tnumsingletons=0.00\tnumexternalmutations=0.00"
        );
    }

    #[test]
    fn test_classic_skips_monomorphic_sites() {
        let matrix = VariantMatrix::from_sites([(0.1, "0110"), (0.15, "1111"), (0.2, "0001")])
            .unwrap();

        let classic = Classic::from_matrix(&matrix, &Polarity::default()).unwrap();

        assert_eq!(classic.numpoly, 2);
        assert_approx_eq!(classic.thetapi, 7.0 / 6.0);
    }

    #[test]
    fn test_classic_missing_data() {
        let matrix = VariantMatrix::from_sites([(0.1, "01N0")]).unwrap();

        assert!(matches!(
            Classic::from_matrix(&matrix, &Polarity::default()),
            Err(InvalidInputError::MissingData { site: 0, sample: 2 })
        ));
    }

    #[test]
    fn test_record() {
        let classic = Classic::from_matrix(&matrix(), &Polarity::default()).unwrap();
        let record = Record::from(&classic);

        assert_eq!(record.len(), 7);
        assert_eq!(record.get("numpoly"), Some(2.0));
        assert_eq!(
            record.names().collect::<Vec<_>>(),
            vec![
                "thetapi",
                "thetaw",
                "thetah",
                "tajimasd",
                "numpoly",
                "numsingletons",
                "numexternalmutations"
            ]
        );
    }
}
