use rand::rngs::StdRng;
use rand::SeedableRng;
use wafer_dashboard::classifier::DefectType;
use wafer_dashboard::controller::MainView;
use wafer_dashboard::{
    ActionView, Artifact, CannedStatsProjector, DashboardError, DateRange, SelectionController,
    TimeWindow,
};

#[test]
fn operator_session_from_upload_to_heatmap() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut ctrl = SelectionController::new();

    // Nothing works before an upload.
    assert_eq!(
        ctrl.set_action_view(ActionView::WaferMap),
        Err(DashboardError::NoArtifactUploaded)
    );

    ctrl.upload_artifact(&Artifact::new("lot_map.png", 100_000));
    assert_eq!(ctrl.catalog().len(), 7);
    assert_eq!(ctrl.selected_lot(), "D100");
    assert_eq!(ctrl.action_view(), ActionView::Query);

    assert_eq!(ctrl.set_action_view(ActionView::Query), Ok(ActionView::Statistics));
    match ctrl.main_view(&mut rng) {
        MainView::Statistics(report) => assert_eq!(report.window, TimeWindow::Today),
        other => panic!("expected statistics, got {:?}", other),
    }

    ctrl.set_action_view(ActionView::WaferMap).unwrap();
    ctrl.select_lot("D106").unwrap();
    let cards = match ctrl.main_view(&mut rng) {
        MainView::WaferGrid { lot, cards } => {
            assert_eq!(lot, "D106");
            cards
        }
        other => panic!("expected grid, got {:?}", other),
    };
    assert_eq!(cards.len(), 25);
    assert!(cards.iter().all(|c| c.wafer_id.starts_with("D106_")));

    ctrl.select_grid_wafer(&cards[9]);
    match ctrl.main_view(&mut rng) {
        MainView::Heatmap(wafer) => {
            assert_eq!(wafer.lot_id, "D106.10");
            assert_eq!(wafer.yield_percent, cards[9].classification.yield_percent);
        }
        other => panic!("expected heatmap, got {:?}", other),
    }

    ctrl.go_back_from_heatmap();
    assert!(matches!(ctrl.main_view(&mut rng), MainView::WaferGrid { .. }));
}

#[test]
fn reupload_replaces_catalog_wholesale() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut ctrl = SelectionController::new();
    ctrl.upload_artifact(&Artifact::new("big.png", 500_000));
    ctrl.select_lot("D111").unwrap();
    ctrl.quick_select_wafer("D111_4", &mut rng).unwrap();

    ctrl.upload_artifact(&Artifact::new("small.png", 1_000));
    assert_eq!(ctrl.catalog().len(), 5);
    assert_eq!(ctrl.selected_lot(), "D100");
    assert_eq!(ctrl.selected_wafer(), None);
    assert_eq!(
        ctrl.select_lot("D111"),
        Err(DashboardError::UnknownLot("D111".to_string()))
    );
}

#[test]
fn custom_range_flows_into_statistics_label_only() {
    let mut ctrl = SelectionController::new();
    ctrl.upload_artifact(&Artifact::new("map.gif", 0));
    ctrl.set_action_view(ActionView::Statistics).unwrap();

    ctrl.toggle_date_picker();
    ctrl.edit_start_date("2024-05-01");
    ctrl.edit_end_date("2024-05-20");
    ctrl.submit_date_range().unwrap();

    let report = ctrl.statistics(&CannedStatsProjector);
    assert_eq!(report.window, TimeWindow::TimeRange);
    assert_eq!(report.total_wafers, 890);
    assert_eq!(report.range_label.as_deref(), Some("2024. 5. 1. ~ 2024. 5. 20."));

    ctrl.set_time_window(TimeWindow::Today, Some(DateRange::new("2024-01-01", "2024-01-02")))
        .unwrap();
    let report = ctrl.statistics(&CannedStatsProjector);
    assert_eq!(report.total_wafers, 456);
    assert_eq!(report.range_label, None);
}

#[test]
fn dynamic_grid_is_redrawn_on_each_render() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut ctrl = SelectionController::new();
    ctrl.upload_artifact(&Artifact::new("map.png", 0));

    let renders: Vec<Vec<DefectType>> = (0..20)
        .map(|_| {
            ctrl.wafer_grid(&mut rng)
                .into_iter()
                .map(|c| c.classification.defect_type)
                .collect()
        })
        .collect();
    assert!(renders.windows(2).any(|pair| pair[0] != pair[1]));
}
