//! Counting engine and execution strategies.
//!
//! Every strategy builds a [`FrequencyTable`](crate::frequency::FrequencyTable)
//! from the same analysis primitives:
//!
//! | Strategy | Input | Work unit | Dispatch |
//! |----------|-------|-----------|----------|
//! | `count_sequential` | text | whole text | calling thread |
//! | `count_words_parallel` | text | word | rayon pool |
//! | `count_words_queued` | text | word | queue + scoped threads |
//! | `count_file` | file | chunk | rayon pool via `par_bridge` |
//! | `count_file_sequential` | file | chunk | calling thread |
//!
//! Threading:
//! - Parallel workers never write to an unsynchronized shared map. They
//!   either own a private table that is merged after the join, or
//!   increment a [`SharedFrequencyTable`](crate::frequency::SharedFrequencyTable),
//!   depending on [`AggregationMode`](tripleter_types::AggregationMode).

mod api;
mod file;
mod sequential;
mod types;
mod words;

pub use types::{EngineMetrics, Strategy, Tripleter};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use tripleter_types::{AggregationMode, TripletConfig, TripletError, TripletFilter};

    const SAMPLE: &str = "Съешь же ещё этих мягких французских булок, да выпей чаю. \
        The quick brown fox jumps over the lazy dog; the DOG sleeps (again)… \
        «Quoted» text – with dashes-and 'apostrophes' and numb3rs!";

    fn case_sensitive() -> Tripleter {
        Tripleter::with_config(TripletConfig::case_sensitive())
    }

    #[test]
    fn scenario_single_triplet() {
        let table = case_sensitive().count_sequential("aaa").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get_str("aaa"), 1);
    }

    #[test]
    fn scenario_repeating_pattern() {
        let table = Tripleter::new().count_sequential("ababab").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_str("aba"), 2);
        assert_eq!(table.get_str("bab"), 2);
    }

    #[test]
    fn scenario_nothing_alphabetic() {
        let engine = Tripleter::new();
        for strategy in Strategy::ALL {
            let table = engine.count("a1b cd!", strategy).unwrap();
            assert!(table.is_empty(), "{}", strategy.name());
        }
    }

    #[test]
    fn scenario_empty_text_rejected() {
        let engine = Tripleter::new();
        for strategy in Strategy::ALL {
            let err = engine.count("", strategy).unwrap_err();
            assert!(
                matches!(err, TripletError::InvalidArgument(_)),
                "{}",
                strategy.name()
            );
        }
        assert_eq!(engine.metrics().runs, 0);
    }

    #[test]
    fn scenario_missing_file() {
        let engine = Tripleter::new();
        let path = std::path::Path::new("/definitely/not/here/triplets.txt");
        assert!(matches!(
            engine.count_file(path),
            Err(TripletError::NotFound(_))
        ));
        assert!(matches!(
            engine.count_file_sequential(path),
            Err(TripletError::NotFound(_))
        ));
    }

    #[test]
    fn case_insensitive_by_default() {
        let table = Tripleter::new().count_sequential("ABC abc AbC").unwrap();
        assert_eq!(table.get_str("abc"), 3);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn case_sensitive_keeps_variants() {
        let table = case_sensitive().count_sequential("ABC abc AbC").unwrap();
        assert_eq!(table.get_str("abc"), 1);
        assert_eq!(table.get_str("ABC"), 1);
        assert_eq!(table.get_str("AbC"), 1);
    }

    #[test]
    fn sequential_is_idempotent() {
        let engine = Tripleter::new();
        let first = engine.count_sequential(SAMPLE).unwrap();
        let second = engine.count_sequential(SAMPLE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn sequential_ignores_unfiltered_config() {
        let engine = Tripleter::with_config(TripletConfig::unfiltered());
        let table = engine.count_sequential("a1b").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn filtered_strategies_agree() {
        let reference = Tripleter::new().count_sequential(SAMPLE).unwrap();
        for aggregation in [AggregationMode::Partitioned, AggregationMode::Shared] {
            for workers in [0, 1, 3] {
                let engine = Tripleter::with_config(TripletConfig {
                    aggregation,
                    workers,
                    ..Default::default()
                });
                for strategy in Strategy::ALL {
                    let table = engine.count(SAMPLE, strategy).unwrap();
                    assert_eq!(
                        table,
                        reference,
                        "{} {:?} workers={}",
                        strategy.name(),
                        aggregation,
                        workers
                    );
                }
            }
        }
    }

    #[test]
    fn unfiltered_word_strategies_keep_every_window() {
        let engine = Tripleter::with_config(TripletConfig {
            filter: TripletFilter::All,
            ..Default::default()
        });
        for strategy in [Strategy::WordsParallel, Strategy::WordsQueued] {
            let table = engine.count("a1b cd x2y2", strategy).unwrap();
            assert_eq!(table.get_str("a1b"), 1);
            assert_eq!(table.get_str("x2y"), 1);
            assert_eq!(table.get_str("2y2"), 1);
            assert_eq!(table.total(), 3);
        }
    }

    #[test]
    fn words_never_straddle_separators() {
        let engine = Tripleter::with_config(TripletConfig {
            filter: TripletFilter::All,
            ..Default::default()
        });
        let table = engine.count_words_parallel("ab cd").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn top_ranks_with_tie_break() {
        let engine = Tripleter::with_config(TripletConfig {
            top_k: 2,
            ..Default::default()
        });
        let top = engine.top("xyz abc xyz abc qrs", Strategy::Sequential).unwrap();
        let rendered: Vec<String> = top.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["abc: 2", "xyz: 2"]);
    }

    #[test]
    fn metrics_track_runs() {
        let engine = Tripleter::new();
        assert_eq!(engine.metrics(), EngineMetrics::default());

        engine.count_sequential("hello").unwrap();
        engine.count_words_parallel("hello world").unwrap();
        engine.count_words_queued("hello world again").unwrap();

        let metrics = engine.metrics();
        assert_eq!(metrics.runs, 3);
        assert_eq!(metrics.words_processed, 5);
        assert_eq!(metrics.triplets_counted, 3 + 6 + 9);

        engine.reset_metrics();
        assert_eq!(engine.metrics(), EngineMetrics::default());
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = Tripleter::new();
        let tables: Vec<FrequencyTable> = crossbeam::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|_| engine.count_words_parallel(SAMPLE).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        })
        .unwrap();

        for pair in tables.windows(2) {
            assert_eq!(pair[0], pair[1]);
        }
        assert_eq!(engine.metrics().runs, 4);
    }

    struct BrokenDisk {
        served: bool,
    }

    impl std::io::Read for BrokenDisk {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.served {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "bad sector"));
            }
            self.served = true;
            let data = b"alpha\nbeta\ngamma\n";
            buf[..data.len()].copy_from_slice(data);
            Ok(data.len())
        }
    }

    #[test]
    fn chunk_read_error_aborts_file_count() {
        for aggregation in [AggregationMode::Partitioned, AggregationMode::Shared] {
            let engine = Tripleter::with_config(TripletConfig {
                aggregation,
                workers: 2,
                ..Default::default()
            });
            let reader = std::io::BufReader::new(BrokenDisk { served: false });
            let chunks = crate::chunk::ChunkReader::new(reader, 1).unwrap();

            let result = engine.count_chunks(chunks);
            assert!(
                matches!(result, Err(TripletError::Io(_))),
                "{aggregation:?}: {result:?}"
            );
            assert_eq!(engine.metrics().runs, 0);
            assert_eq!(engine.metrics().triplets_counted, 0);
        }
    }

    #[test]
    fn strategy_names() {
        let names: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["sequential", "words-parallel", "words-queued"]);
        assert_eq!(Strategy::default(), Strategy::Sequential);
    }
}
