//! # Integration Tests
//!
//! End-to-end tests over the public crate APIs.
//!
//! Covers:
//! - Contract snapshot checks
//! - Corpus -> pipeline -> engine -> export flows (no external NLP needed)
//! - Event-stream ordering and partial-failure semantics

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
        let _ = contracts::CancellationToken::new();
    }
}

#[cfg(test)]
mod property_tests {
    use dispersion::DispersionAnalyzer;

    /// Bound properties over a grid of frequency/size shapes.
    #[test]
    fn test_metric_bounds_across_shapes() {
        let cases: Vec<(Vec<f64>, Vec<f64>)> = vec![
            (vec![1.0], vec![10.0]),
            (vec![9.0, 0.0], vec![10.0, 90.0]),
            (vec![3.0, 3.0, 3.0], vec![30.0, 30.0, 40.0]),
            (vec![0.0, 0.0, 12.0, 1.0], vec![5.0, 5.0, 80.0, 10.0]),
            (vec![1.0, 1.0, 1.0, 1.0, 1.0], vec![2.0, 4.0, 8.0, 16.0, 70.0]),
        ];

        for (v, sizes) in cases {
            let total: f64 = sizes.iter().sum();
            let n = v.len();
            let analyzer = DispersionAnalyzer::new(v.clone(), sizes, total).unwrap();
            let m = analyzer.calculate_all_metrics();

            assert!(m.range <= n, "range bound for {v:?}");
            let pt = m.pervasiveness_pt.unwrap();
            assert!((0.0..=1.0).contains(&pt), "PT bound for {v:?}");
            assert!(
                (pt - m.range as f64 / n as f64).abs() < 1e-12,
                "PT = range/n for {v:?}"
            );
            assert!(
                (0.0..=1.0).contains(&m.evenness_da.unwrap()),
                "DA bound for {v:?}"
            );
            assert!(
                (0.0..=1.0).contains(&m.jsd_dispersion.unwrap()),
                "JSD bound for {v:?}"
            );
            assert!(
                (0.0..=1.0).contains(&m.hellinger_dispersion.unwrap()),
                "Hellinger bound for {v:?}"
            );
            assert!(m.kl_divergence.unwrap() >= 0.0, "KL >= 0 for {v:?}");
        }
    }

    /// KL is zero exactly when observed proportions match expected shares.
    #[test]
    fn test_kl_zero_at_expected_distribution() {
        let analyzer =
            DispersionAnalyzer::new(vec![2.0, 6.0, 12.0], vec![10.0, 30.0, 60.0], 100.0).unwrap();
        assert!(analyzer.kl_divergence().unwrap().abs() < 1e-12);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashMap;
    use std::fs;
    use std::sync::Arc;

    use contracts::{
        AnalysisEvent, AnalysisSettings, CancellationToken, CorpusSource, SinkConfig, SinkType,
        UnitResult,
    };
    use corpus_pipeline::{channel_events, CorpusPipeline, FsDocumentReader, WhitespaceTokenizer};
    use export::create_exporter;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    fn write_corpus(docs: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in docs {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn pipeline(settings: AnalysisSettings) -> CorpusPipeline {
        CorpusPipeline::new(
            Arc::new(WhitespaceTokenizer::new()),
            Arc::new(FsDocumentReader),
            settings,
        )
    }

    /// Drive a pipeline run on a blocking worker while draining its events.
    async fn run_collecting(
        pipeline: CorpusPipeline,
        source: CorpusSource,
        cancel: CancellationToken,
    ) -> (corpus_pipeline::RunOutcome, Vec<AnalysisEvent>) {
        let (events, event_rx) = channel_events(16);

        let worker = tokio::task::spawn_blocking(move || pipeline.run(&source, &events, &cancel));

        let mut collected = Vec::new();
        while let Ok(event) = event_rx.recv().await {
            collected.push(event);
        }

        let outcome = worker.await.unwrap().unwrap();
        (outcome, collected)
    }

    /// End-to-end: corpus directory -> pipeline -> exporter -> CSV on disk
    ///
    /// One of the three documents is undecodable; the run must complete,
    /// emit exactly one warning, and export every analyzed unit.
    #[tokio::test]
    async fn test_e2e_corpus_to_csv() {
        let corpus = write_corpus(&[("a.txt", "red blue red"), ("c.txt", "blue green")]);
        fs::write(corpus.path().join("b.txt"), [0xff, 0xfe, 0x80]).unwrap();

        let out_dir = tempfile::tempdir().unwrap();
        let csv_path = out_dir.path().join("results.csv");

        let (outcome, events) = run_collecting(
            pipeline(AnalysisSettings::default()),
            CorpusSource::Directory(corpus.path().to_path_buf()),
            CancellationToken::new(),
        )
        .await;

        assert_eq!(outcome.stats.documents_total, 3);
        assert_eq!(outcome.stats.documents_empty, 1);
        assert_eq!(outcome.stats.units_analyzed, 3);

        let warnings = events
            .iter()
            .filter(|e| matches!(e, AnalysisEvent::Warning { .. }))
            .count();
        assert_eq!(warnings, 1);

        // Export the final rows through the exporter fan-out
        let configs = vec![SinkConfig {
            name: "csv".to_string(),
            sink_type: SinkType::Csv,
            queue_capacity: 8,
            params: HashMap::from([("path".to_string(), csv_path.display().to_string())]),
        }];
        let (tx, rx) = mpsc::channel::<UnitResult>(8);
        let exporter = create_exporter(&configs, rx).unwrap();
        let handle = exporter.spawn();

        for row in &outcome.results {
            tx.send(row.clone()).await.unwrap();
        }
        drop(tx);
        handle.await.unwrap();

        let csv = fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1 + outcome.results.len());
        assert!(lines[0].starts_with("word,pos,num_chars,total_frequency,range"));
        assert!(lines.iter().any(|line| line.starts_with("red,word,3,")));
    }

    /// The documented three-part scenario, driven through the whole stack:
    /// 3 parts of 10 tokens, target unit with frequencies [5, 0, 5].
    #[tokio::test]
    async fn test_three_part_scenario_through_pipeline() {
        let corpus = write_corpus(&[
            ("p0.txt", "tgt tgt tgt tgt tgt f1 f2 f3 f4 f5"),
            ("p1.txt", "g1 g2 g3 g4 g5 g6 g7 g8 g9 g10"),
            ("p2.txt", "tgt tgt tgt tgt tgt h1 h2 h3 h4 h5"),
        ]);

        let (outcome, _) = run_collecting(
            pipeline(AnalysisSettings::default()),
            CorpusSource::Directory(corpus.path().to_path_buf()),
            CancellationToken::new(),
        )
        .await;

        assert_eq!(outcome.stats.corpus_tokens, 30.0);

        let target = outcome
            .results
            .iter()
            .find(|r| r.word == "tgt")
            .expect("target unit analyzed");
        let metrics = &target.metrics;

        assert_eq!(target.total_frequency, 10.0);
        assert_eq!(metrics.range, 2);
        assert!((metrics.pervasiveness_pt.unwrap() - 2.0 / 3.0).abs() < 1e-9);
        assert!((metrics.mean_text_frequency_ft.unwrap() - 1.0 / 3.0).abs() < 1e-9);
        assert!((metrics.evenness_da.unwrap() - 0.5).abs() < 1e-9);
        assert!((metrics.juilland_d.unwrap() - 0.5).abs() < 1e-9);
        assert!((metrics.dp_norm.unwrap() - 0.5).abs() < 1e-9);
    }

    /// Aggregation round-trip: per-part unit counts sum to what the
    /// tokenizer reported for each part.
    #[tokio::test]
    async fn test_aggregation_round_trip() {
        let corpus = write_corpus(&[("a.txt", "x y x z"), ("b.txt", "y y w")]);

        let (outcome, _) = run_collecting(
            pipeline(AnalysisSettings::default()),
            CorpusSource::Directory(corpus.path().to_path_buf()),
            CancellationToken::new(),
        )
        .await;

        let unit_total: f64 = outcome.results.iter().map(|r| r.total_frequency).sum();
        assert_eq!(unit_total, 7.0);
        assert_eq!(outcome.stats.corpus_tokens, 7.0);
    }

    /// Stopword filtering removes units but never shrinks part sizes.
    #[tokio::test]
    async fn test_stopword_policy_preserves_sizes() {
        let corpus = write_corpus(&[("a.txt", "the alpha the beta")]);
        let stop_path = corpus.path().join("stop.list");
        fs::write(&stop_path, "the\n").unwrap();
        // Keep the stopword list out of the corpus: it has no .txt extension

        let mut tokenizer = WhitespaceTokenizer::new();
        tokenizer.load_stopwords(&stop_path).unwrap();
        let pipeline = CorpusPipeline::new(
            Arc::new(tokenizer),
            Arc::new(FsDocumentReader),
            AnalysisSettings::default(),
        );

        let (outcome, _) = run_collecting(
            pipeline,
            CorpusSource::Directory(corpus.path().to_path_buf()),
            CancellationToken::new(),
        )
        .await;

        // Normalization denominator still counts the filtered tokens
        assert_eq!(outcome.stats.corpus_tokens, 4.0);

        let words: Vec<&str> = outcome.results.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["alpha", "beta"]);

        // Densities use the pre-filter size: 1/4 each
        let alpha = &outcome.results[0];
        assert!((alpha.metrics.mean_text_frequency_ft.unwrap() - 0.25).abs() < 1e-9);
    }

    /// Event ordering invariant across the channel bridge.
    #[tokio::test]
    async fn test_event_stream_ordering() {
        let corpus = write_corpus(&[("a.txt", "one two three"), ("b.txt", "two three four")]);

        let (_, events) = run_collecting(
            pipeline(AnalysisSettings {
                progress_every: 1,
                ..Default::default()
            }),
            CorpusSource::Directory(corpus.path().to_path_buf()),
            CancellationToken::new(),
        )
        .await;

        let last_pass1 = events
            .iter()
            .rposition(|e| matches!(e, AnalysisEvent::Pass1Progress { .. }))
            .unwrap();
        let pass2 = events
            .iter()
            .position(|e| matches!(e, AnalysisEvent::Pass2Complete))
            .unwrap();
        let first_pass3 = events
            .iter()
            .position(|e| matches!(e, AnalysisEvent::Pass3Progress { .. }))
            .unwrap();
        let complete = events
            .iter()
            .position(|e| matches!(e, AnalysisEvent::AnalysisComplete))
            .unwrap();

        assert!(last_pass1 < pass2);
        assert!(pass2 < first_pass3);
        assert!(first_pass3 < complete);

        // Exactly one terminal FinalResults, and it is last
        let terminals: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_terminal())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(terminals, vec![events.len() - 1]);
    }

    /// A cancelled run reports no final results.
    #[tokio::test]
    async fn test_cancelled_run_has_empty_terminal() {
        let corpus = write_corpus(&[("a.txt", "alpha beta gamma")]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let (outcome, events) = run_collecting(
            pipeline(AnalysisSettings::default()),
            CorpusSource::Directory(corpus.path().to_path_buf()),
            cancel,
        )
        .await;

        assert!(outcome.stats.cancelled);
        assert!(outcome.results.is_empty());
        match events.last().unwrap() {
            AnalysisEvent::FinalResults { results } => assert!(results.is_empty()),
            other => panic!("expected terminal FinalResults, got {other:?}"),
        }
    }

    /// Vocabulary-wide aggregation over a real run's results.
    #[tokio::test]
    async fn test_run_summary_aggregation() {
        let corpus = write_corpus(&[("a.txt", "x x y"), ("b.txt", "x z")]);

        let (outcome, _) = run_collecting(
            pipeline(AnalysisSettings::default()),
            CorpusSource::Directory(corpus.path().to_path_buf()),
            CancellationToken::new(),
        )
        .await;

        let mut aggregator = observability::RunSummaryAggregator::new();
        for row in &outcome.results {
            aggregator.update(row);
        }

        let summary = aggregator.summary();
        assert_eq!(summary.units, outcome.results.len() as u64);
        assert!(summary.dp.count > 0);
        assert!(summary.evenness_da.max <= 1.0);
    }

    /// Config file -> plan -> pipeline settings flow.
    #[tokio::test]
    async fn test_config_driven_run() {
        let corpus = write_corpus(&[("a.txt", "alpha beta alpha")]);
        let config_path = corpus.path().join("analysis.toml");
        fs::write(
            &config_path,
            format!(
                "[corpus]\ndir = \"{}\"\n\n[analysis]\nexclude_stopwords = false\n",
                corpus.path().display()
            ),
        )
        .unwrap();

        let plan = config_loader::ConfigLoader::load_from_path(&config_path).unwrap();
        let source = plan.corpus_source().unwrap();
        let settings = plan.analysis.clone();

        let (outcome, _) =
            run_collecting(pipeline(settings), source, CancellationToken::new()).await;

        assert_eq!(outcome.stats.units_analyzed, 2);
        let alpha = &outcome.results[0];
        assert_eq!(alpha.word, "alpha");
        assert_eq!(alpha.total_frequency, 2.0);
    }
}
