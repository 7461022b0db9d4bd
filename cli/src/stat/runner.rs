use std::{fmt, io};

use anyhow::{Context, Error};

use msstats_core::{
    filter_sites,
    input::{self, ms},
    stat::{Classic, Garud, Polarity, Record, StateCounts},
    Input, VariantMatrix,
};

use super::{Stat, Statistic};

#[derive(Clone, Debug, PartialEq)]
pub struct StatisticWithOptions {
    statistic: Statistic,
    precision: usize,
}

impl StatisticWithOptions {
    pub fn new(statistic: Statistic, precision: usize) -> Self {
        Self {
            statistic,
            precision,
        }
    }
}

pub struct Runner<R, W> {
    reader: ms::Reader<R>,
    writer: W,
    statistics: Vec<StatisticWithOptions>,
    polarity: Polarity,
    min_count: Option<u32>,
    header: bool,
    delimiter: char,
}

impl<R, W> Runner<R, W>
where
    R: io::BufRead,
    W: io::Write,
{
    pub fn run(&mut self) -> Result<(), Error> {
        if self.header {
            self.write_header()?;
        }

        let mut replicates = 0;
        while let Some(mut matrix) = self.reader.read_replicate()? {
            replicates += 1;

            if let Some(min_count) = self.min_count {
                filter_sites(&mut matrix, |site| {
                    StateCounts::from_site(site, None).derived() >= min_count
                });
            }

            let record = self.calculate(&matrix).with_context(|| {
                format!("failed to calculate statistics for replicate {replicates}")
            })?;
            self.write_statistics(&record)?;
        }

        log::info!("Processed {replicates} replicates");

        Ok(())
    }

    fn calculate(&self, matrix: &VariantMatrix) -> Result<Record, Error> {
        let mut record = Record::default();
        let haplotype_based = |s: &StatisticWithOptions| s.statistic.is_haplotype_based();

        if !self.statistics.iter().all(haplotype_based) {
            record.extend(&Classic::from_matrix(matrix, &self.polarity)?);
        }
        if self.statistics.iter().any(haplotype_based) {
            record.extend(&Garud::from_matrix(matrix));
        }

        Ok(record)
    }

    fn write_header(&mut self) -> Result<(), Error> {
        let header_names = self
            .statistics
            .iter()
            .map(|s| s.statistic.header_name())
            .collect::<Vec<_>>();

        self.write_with_delimiter(header_names)
    }

    fn write_statistics(&mut self, record: &Record) -> Result<(), Error> {
        let statistics = self
            .statistics
            .iter()
            .map(|s| {
                record
                    .get(s.statistic.header_name())
                    .map(|v| format!("{v:.precision$}", precision = s.precision))
                    .with_context(|| format!("statistic {} was not calculated", s.statistic))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.write_with_delimiter(statistics)
    }

    fn write_with_delimiter<I>(&mut self, items: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        for (i, x) in items.into_iter().enumerate() {
            if i > 0 {
                write!(self.writer, "{}", self.delimiter)?;
            }
            write!(self.writer, "{x}")?;
        }
        writeln!(self.writer)?;

        Ok(())
    }
}

impl TryFrom<&Stat> for Runner<input::Reader, io::StdoutLock<'static>> {
    type Error = Error;

    fn try_from(args: &Stat) -> Result<Self, Self::Error> {
        let reader = Input::new(args.input.clone())?.open()?;

        Ok(Self {
            reader: ms::Reader::new(reader),
            writer: io::stdout().lock(),
            statistics: args.statistics_with_options()?,
            polarity: args.polarity(),
            min_count: args.min_count,
            header: args.header,
            delimiter: args.delimiter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: &str = "\
ms 4 2 -t 2
1 2 3

//
segsites: 2
positions: 0.1 0.2
00
10
10
01

//
segsites: 0
";

    fn run(statistics: &[Statistic], min_count: Option<u32>, header: bool) -> String {
        let mut runner = Runner {
            reader: ms::Reader::new(MS.as_bytes()),
            writer: Vec::new(),
            statistics: statistics
                .iter()
                .map(|&s| StatisticWithOptions::new(s, 4))
                .collect(),
            polarity: Polarity::Ancestral(0),
            min_count,
            header,
            delimiter: ',',
        };
        runner.run().unwrap();

        String::from_utf8(runner.writer).unwrap()
    }

    #[test]
    fn test_classic_rows() {
        let output = run(
            &[
                Statistic::ThetaPi,
                Statistic::S,
                Statistic::ExternalSingletons,
            ],
            None,
            true,
        );

        assert_eq!(
            output,
            "thetapi,numpoly,numexternalmutations\n1.1667,2.0000,1.0000\n0.0000,0.0000,0.0000\n"
        );
    }

    #[test]
    fn test_haplotype_rows() {
        let output = run(&[Statistic::H1, Statistic::H2H1], None, false);

        assert_eq!(output, "0.3750,0.3333\n1.0000,0.0000\n");
    }

    #[test]
    fn test_min_count() {
        let output = run(&[Statistic::S, Statistic::ThetaPi], Some(2), false);

        assert_eq!(output, "1.0000,0.6667\n0.0000,0.0000\n");
    }

    #[test]
    fn test_missing_data_error() {
        let src = "ms 2 1\n//\nsegsites: 1\npositions: 0.5\nN\n1\n";
        let mut runner = Runner {
            reader: ms::Reader::new(src.as_bytes()),
            writer: Vec::new(),
            statistics: vec![StatisticWithOptions::new(Statistic::ThetaPi, 6)],
            polarity: Polarity::Ancestral(0),
            min_count: None,
            header: false,
            delimiter: '\t',
        };

        assert!(runner.run().is_err());
    }
}
