#[cfg(test)]
mod integration_tests {
    use crate::config::DriverConfig;
    use crate::driver;
    use crate::{Point, Polygon, RangeSearch, RangeSearchError};
    use rand::{Rng, SeedableRng};
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::thread;

    fn polygon(coords: &[[f64; 2]]) -> Polygon {
        Polygon::try_from(coords).unwrap()
    }

    fn small_dataset() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 10.0),
            Point::new(2.0, 2.0),
        ]
    }

    // ============================================================================
    // ENGINE SCENARIOS
    // ============================================================================

    #[test]
    fn test_square_query_pins_corner_point() {
        let engine = RangeSearch::new(small_dataset()).unwrap();
        let square = polygon(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]);

        let result = engine.query_poly(&square);
        // (0,0) is the bottom-left corner, which the crossing-number test counts as inside
        assert_eq!(result.indices(), &[0, 3]);
        assert_eq!(result.count(), 2);
        assert_eq!(engine.query_poly_count(&square), 2);
    }

    #[test]
    fn test_full_square_covers_random_interior_points() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1000);
        // Strictly inside (0, 100) so no point lands on the boundary
        let points: Vec<Point> = (0..1000)
            .map(|_| {
                Point::new(
                    rng.random_range(f64::EPSILON..100.0),
                    rng.random_range(f64::EPSILON..100.0),
                )
            })
            .collect();
        let engine = RangeSearch::new(points).unwrap();
        let square = polygon(&[[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]]);

        let result = engine.query_poly(&square);
        assert_eq!(result.count(), 1000);
        assert_eq!(result.indices(), (0..1000).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn test_l_shape_excludes_notch_point() {
        let points = vec![
            Point::new(2.0, 2.0), // lower arm
            Point::new(7.0, 7.0), // notch: inside bbox, outside polygon
            Point::new(2.0, 8.0), // upper arm
            Point::new(8.0, 2.0), // right arm
        ];
        let engine = RangeSearch::new(points).unwrap();
        let l = polygon(&[[0.0, 0.0], [10.0, 0.0], [10.0, 4.0], [4.0, 4.0], [4.0, 10.0], [0.0, 10.0]]);

        let result = engine.query_poly(&l);
        assert_eq!(result.indices(), &[0, 2, 3]);
        assert_eq!(engine.query_poly_count(&l), 3);
    }

    #[test]
    fn test_triangle_with_empty_bbox_returns_nothing() {
        let engine = RangeSearch::new(small_dataset()).unwrap();
        let far = polygon(&[[20.0, 20.0], [30.0, 20.0], [25.0, 30.0]]);

        let result = engine.query_poly(&far);
        assert!(result.is_empty());
        assert_eq!(result.count(), 0);
        assert!(result.indices().is_empty());
    }

    #[test]
    fn test_zero_area_polygon_returns_nothing() {
        let engine = RangeSearch::new(small_dataset()).unwrap();
        let diagonal = polygon(&[[0.0, 0.0], [5.0, 5.0], [10.0, 10.0]]);
        assert_eq!(engine.query_poly_count(&diagonal), 0);
    }

    #[test]
    fn test_duplicate_points_are_all_reported() {
        let mut points = small_dataset();
        points.push(Point::new(2.0, 2.0));
        let engine = RangeSearch::new(points).unwrap();
        let square = polygon(&[[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0]]);
        assert_eq!(engine.query_poly(&square).into_indices(), vec![3, 4]);
    }

    // ============================================================================
    // ERROR HANDLING
    // ============================================================================

    #[test]
    fn test_empty_dataset_is_rejected() {
        let err = RangeSearch::new(Vec::new()).unwrap_err();
        assert!(matches!(err, RangeSearchError::EmptyDataset), "got {err:?}");
    }

    #[test]
    fn test_non_finite_dataset_is_rejected() {
        let err = RangeSearch::new(vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)]).unwrap_err();
        assert!(
            matches!(err, RangeSearchError::NonFiniteCoordinate { index: 1, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_invalid_node_size_is_rejected() {
        let err = RangeSearch::with_node_size(small_dataset(), 0).unwrap_err();
        assert!(matches!(err, RangeSearchError::InvalidNodeSize(0)), "got {err:?}");
    }

    #[test]
    fn test_huge_node_size_still_finds_points() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        let engine = RangeSearch::with_node_size(points, usize::MAX).unwrap();
        let square = polygon(&[[-1.0, -1.0], [5.0, -1.0], [5.0, 5.0], [-1.0, 5.0]]);
        assert_eq!(engine.query_poly(&square).indices(), &[0, 1, 2]);
        assert_eq!(engine.query_poly_count(&square), 3);
    }

    #[test]
    fn test_engine_usable_after_rejected_polygon() {
        let engine = RangeSearch::new(small_dataset()).unwrap();
        let rejected = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(matches!(rejected, Err(RangeSearchError::TooFewVertices(2))));

        let square = polygon(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]);
        assert_eq!(engine.query_poly(&square).indices(), &[0, 3]);
    }

    // ============================================================================
    // CONCURRENCY
    // ============================================================================

    #[test]
    fn test_concurrent_queries_agree_with_sequential() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(8);
        let points: Vec<Point> = (0..5_000)
            .map(|_| Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        let engine = Arc::new(RangeSearch::new(points).unwrap());
        let polygons: Vec<Polygon> = (0..8)
            .map(|i| {
                let o = f64::from(i) * 10.0;
                polygon(&[[o, o], [o + 30.0, o], [o + 15.0, o + 30.0]])
            })
            .collect();
        let expected: Vec<_> = polygons.iter().map(|p| engine.query_poly(p)).collect();

        let handles: Vec<_> = polygons
            .into_iter()
            .map(|p| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || engine.query_poly(&p))
            })
            .collect();
        for (handle, want) in handles.into_iter().zip(expected) {
            assert_eq!(handle.join().unwrap(), want);
        }
    }

    // ============================================================================
    // DRIVER
    // ============================================================================

    fn write_case(root: &Path, name: &str, points: &str, query: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("input_points.json"), points).unwrap();
        fs::write(dir.join("input_query.json"), query).unwrap();
        dir
    }

    #[test]
    fn test_driver_writes_reports() {
        let root = tempfile::tempdir().unwrap();
        let case = write_case(
            root.path(),
            "test_case_1",
            "[[0, 0], [5, 5], [10, 10], [2, 2]]",
            "[[[0,0],[4,0],[4,4],[0,4]], [[20,20],[30,20],[25,30]], [[-1,-1],[11,-1],[11,11],[-1,11]]]",
        );
        let config = DriverConfig::new(root.path());

        let report = driver::process_test_case(&case, &config).unwrap();
        assert_eq!(report.points, 4);
        assert_eq!(report.polygons, 3);
        assert_eq!(report.total(), report.preprocessing + report.query);

        let indices = fs::read_to_string(case.join("output_result_report.json")).unwrap();
        let counts = fs::read_to_string(case.join("output_result_count.json")).unwrap();
        assert_eq!(indices, "[[0,3], [], [0,1,2,3]]");
        assert_eq!(counts, "[2, 0, 4]");
    }

    #[test]
    fn test_driver_run_skips_failing_cases() {
        let root = tempfile::tempdir().unwrap();
        let _good = write_case(root.path(), "test_case_a", "[[1, 1]]", "[[[0,0],[2,0],[2,2],[0,2]]]");
        // Empty dataset
        let bad = write_case(root.path(), "test_case_b", "[]", "[[[0,0],[2,0],[2,2]]]");
        let _ignored = write_case(root.path(), "other", "[]", "[]");

        let config = DriverConfig::new(root.path());
        let cases = driver::discover_test_cases(&config).unwrap();
        assert_eq!(cases.len(), 2, "Only prefixed directories are test cases");
        assert!(cases[0].ends_with("test_case_a") && cases[1].ends_with("test_case_b"));

        let summary = driver::run(&config).unwrap();
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert!(!bad.join("output_result_report.json").exists(), "Failed case writes no output");
    }

    #[test]
    fn test_driver_invalid_polygon_yields_empty_result() {
        let root = tempfile::tempdir().unwrap();
        let case = write_case(
            root.path(),
            "test_case_poly",
            "[[0, 0], [5, 5], [10, 10], [2, 2]]",
            "[[[0,0],[4,0],[4,4],[0,4]], [[0,0],[4,0]], [[-1,-1],[11,-1],[11,11],[-1,11]]]",
        );

        let report = driver::process_test_case(&case, &DriverConfig::new(root.path())).unwrap();
        assert_eq!(report.polygons, 3);
        let indices = fs::read_to_string(case.join("output_result_report.json")).unwrap();
        let counts = fs::read_to_string(case.join("output_result_count.json")).unwrap();
        assert_eq!(indices, "[[0,3], [], [0,1,2,3]]");
        assert_eq!(counts, "[2, 0, 4]");
    }

    #[test]
    fn test_read_polygons_validates_each_ring() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("input_query.json");
        fs::write(&path, "[[[0,0],[1,0],[0,1]], [[0,0]], [[0,0],[1,0],[1,1],[0,1]]]").unwrap();

        let polygons = driver::read_polygons(&path).unwrap();
        assert_eq!(polygons.len(), 3);
        assert!(polygons[0].is_ok() && polygons[2].is_ok());
        assert!(matches!(polygons[1], Err(RangeSearchError::TooFewVertices(1))));
    }

    #[test]
    fn test_driver_reports_empty_dataset() {
        let root = tempfile::tempdir().unwrap();
        let case = write_case(root.path(), "test_case_empty", "[]", "[[[0,0],[1,0],[0,1]]]");
        let err = driver::process_test_case(&case, &DriverConfig::new(root.path())).unwrap_err();
        assert!(matches!(err, RangeSearchError::EmptyDataset), "got {err:?}");
    }

    #[test]
    fn test_driver_reports_malformed_json() {
        let root = tempfile::tempdir().unwrap();
        let case = write_case(root.path(), "test_case_json", "[[0, 0], [1]]", "[]");
        let err = driver::process_test_case(&case, &DriverConfig::new(root.path())).unwrap_err();
        assert!(matches!(err, RangeSearchError::Json { .. }), "got {err:?}");
    }

    #[test]
    fn test_driver_reports_missing_input() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("test_case_missing");
        fs::create_dir_all(&dir).unwrap();
        let err = driver::process_test_case(&dir, &DriverConfig::new(root.path())).unwrap_err();
        assert!(matches!(err, RangeSearchError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn test_driver_missing_root() {
        let root = tempfile::tempdir().unwrap();
        let config = DriverConfig::new(root.path().join("does_not_exist"));
        let err = driver::run(&config).unwrap_err();
        assert!(matches!(err, RangeSearchError::NotADirectory(_)), "got {err:?}");
    }

    #[test]
    fn test_config_root_from_first_argument() {
        let config = DriverConfig::from_args(vec!["cases".to_owned(), "ignored".to_owned()]);
        assert_eq!(config.root, PathBuf::from("cases"));
        assert_eq!(config.case_prefix, "test_case_");
        assert_eq!(config.points_file, "input_points.json");
    }
}
