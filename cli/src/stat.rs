use std::{fmt, io, path::PathBuf};

use anyhow::Error;

use clap::{CommandFactory, Parser, ValueEnum};
use msstats_core::{input, stat::Polarity, Genotype};

mod runner;
use runner::{Runner, StatisticWithOptions};

/// Calculate summary statistics for each replicate.
#[derive(Debug, Parser)]
#[clap(name = crate::NAME, about)]
pub struct Stat {
    /// Input "ms" output.
    ///
    /// The input can be provided here or read from stdin, and may be gzip-compressed.
    #[clap(value_parser, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Ancestral state.
    ///
    /// Calls other than the ancestral state are counted as derived. Data simulated with "ms" uses
    /// 0 for the ancestral state.
    #[clap(
        short = 'a',
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(Genotype).range(0..),
        value_name = "STATE",
        conflicts_with = "unpolarized"
    )]
    pub ancestral: Genotype,

    /// Delimiter between statistics.
    #[clap(short = 'd', long, default_value_t = '\t', value_name = "CHAR")]
    pub delimiter: char,

    /// Include a header with the names of statistics.
    #[clap(short = 'H', long)]
    pub header: bool,

    /// Minimum minor allele count.
    ///
    /// Sites where fewer samples carry the minor allele are removed before calculating
    /// statistics.
    #[clap(short = 'm', long, value_name = "INT")]
    pub min_count: Option<u32>,

    /// Precision to use when printing statistics.
    ///
    /// If a single value is provided, this will be used for all statistics. If more than one
    /// statistic is calculated, the same number of precision specifiers may be provided, and they
    /// will be applied in the same order. Use comma to separate precision specifiers.
    #[clap(
        short = 'p',
        long,
        default_value = "6",
        use_value_delimiter = true,
        value_name = "INT,..."
    )]
    pub precision: Vec<usize>,

    /// Statistics to calculate.
    ///
    /// More than one statistic can be output. Use comma to separate statistics.
    #[clap(
        short = 's',
        long,
        value_enum,
        default_values = [
            "thetapi",
            "thetaw",
            "thetah",
            "tajimasd",
            "s",
            "singletons",
            "external-singletons",
        ],
        use_value_delimiter = true,
        value_name = "STAT,..."
    )]
    pub statistics: Vec<Statistic>,

    /// Treat ancestral states as unknown.
    ///
    /// The minor allele at each site is then counted as derived, so that Fay and Wu's estimator
    /// and the number of external singletons are computed from the folded counts.
    #[clap(short = 'u', long)]
    pub unpolarized: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Statistic {
    /// Tajima's estimator of θ, the mean number of pairwise differences.
    #[value(name = "thetapi")]
    ThetaPi,
    /// Watterson's estimator of θ.
    #[value(name = "thetaw")]
    ThetaW,
    /// Fay and Wu's estimator of θ.
    #[value(name = "thetah")]
    ThetaH,
    /// Tajima's D statistic.
    #[value(name = "tajimasd")]
    TajimasD,
    /// Number of segregating sites.
    S,
    /// Number of sites where exactly one sample differs from the rest.
    Singletons,
    /// Number of sites where exactly one sample carries the derived call.
    ExternalSingletons,
    /// Haplotype homozygosity. See Garud et al. (2015).
    H1,
    /// Haplotype homozygosity with the two most common haplotypes pooled.
    H12,
    /// Haplotype homozygosity with the three most common haplotypes pooled.
    H123,
    /// Haplotype homozygosity without the most common haplotype.
    H2,
    /// The ratio of H2 over H1.
    #[value(name = "h2h1")]
    H2H1,
}

impl Statistic {
    /// Returns `true` if the statistic is based on haplotype frequencies.
    pub fn is_haplotype_based(&self) -> bool {
        matches!(
            self,
            Statistic::H1 | Statistic::H12 | Statistic::H123 | Statistic::H2 | Statistic::H2H1
        )
    }

    pub fn header_name(&self) -> &'static str {
        match self {
            Statistic::ThetaPi => "thetapi",
            Statistic::ThetaW => "thetaw",
            Statistic::ThetaH => "thetah",
            Statistic::TajimasD => "tajimasd",
            Statistic::S => "numpoly",
            Statistic::Singletons => "numsingletons",
            Statistic::ExternalSingletons => "numexternalmutations",
            Statistic::H1 => "h1",
            Statistic::H12 => "h12",
            Statistic::H123 => "h123",
            Statistic::H2 => "h2",
            Statistic::H2H1 => "h2h1",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_name())
    }
}

impl Stat {
    fn polarity(&self) -> Polarity {
        if self.unpolarized {
            Polarity::Unknown
        } else {
            Polarity::Ancestral(self.ancestral)
        }
    }

    fn statistics_with_options(&self) -> Result<Vec<StatisticWithOptions>, Error> {
        let statistics = match (&self.precision[..], &self.statistics[..]) {
            (&[precision], statistics) => statistics
                .iter()
                .map(|&s| StatisticWithOptions::new(s, precision))
                .collect::<Vec<_>>(),
            (precisions, statistics) if precisions.len() == statistics.len() => statistics
                .iter()
                .zip(precisions.iter())
                .map(|(&s, &p)| StatisticWithOptions::new(s, p))
                .collect::<Vec<_>>(),
            (precisions, statistics) => {
                return Err(Stat::command()
                    .error(
                        clap::error::ErrorKind::ValueValidation,
                        format!(
                            "number of precision specifiers must equal one \
                                or the number of statistics \
                                (found {} precision specifiers and {} statistics)",
                            precisions.len(),
                            statistics.len()
                        ),
                    )
                    .into());
            }
        };

        Ok(statistics)
    }

    pub fn run(self) -> Result<(), Error> {
        let mut runner: Runner<input::Reader, io::StdoutLock<'static>> = Runner::try_from(&self)?;
        runner.run()
    }
}
