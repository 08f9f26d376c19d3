
use scholes_lib::history::{heatmap_records, HeatmapRecord};
use scholes_lib::sweep::sweep_many;
use scholes_lib::{price, Axis, HistoryStore, OutputField, ParameterField};
use test_utils::{atm_params, params, temp_store};

#[test]
fn test_insert_and_list_calculations() {
    let (_dir, store) = temp_store();

    let p1 = atm_params();
    let p2 = params(95.0, 100.0, 0.5, 0.3, 0.01);
    let id1 = store.insert_calculation(&p1, &price(p1).unwrap()).unwrap();
    let id2 = store.insert_calculation(&p2, &price(p2).unwrap()).unwrap();
    assert_eq!((id1, id2), (1, 2));

    let rows = store.list_calculations().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].calc_id, 1);
    assert_eq!(rows[1].current_price, 95.0);
    assert_eq!(rows[1].parameters().unwrap(), p2);
    assert_eq!(rows[0].call_price, price(p1).unwrap().call_price);
}

#[test]
fn test_store_survives_reopen() {
    let (_dir, store) = temp_store();
    let p = atm_params();
    store.insert_calculation(&p, &price(p).unwrap()).unwrap();

    let reopened = HistoryStore::open(store.config().clone()).unwrap();
    assert_eq!(reopened.list_calculations().unwrap().len(), 1);
    assert!(reopened.get_calculation(1).unwrap().is_some());
    assert!(reopened.get_calculation(2).unwrap().is_none());
}

/// Stored heatmap cells come back as the same call/put matrices.
#[test]
fn test_heatmap_round_trip() {
    let (_dir, store) = temp_store();
    let base = atm_params();
    let calc_id = store.insert_calculation(&base, &price(base).unwrap()).unwrap();

    let spots = Axis::new(ParameterField::Spot, vec![90.0, 100.0, 110.0]);
    let vols = Axis::new(ParameterField::Volatility, vec![0.15, 0.25]);
    let ms = sweep_many(
        base,
        &spots,
        &vols,
        &[OutputField::CallPrice, OutputField::PutPrice],
    )
    .unwrap();

    let records = heatmap_records(&ms[0], &ms[1]).expect("aligned matrices");
    assert_eq!(records.len(), 6);
    assert_eq!(store.insert_heatmap_records(calc_id, &records).unwrap(), 6);

    let loaded = store.load_heatmap(calc_id).unwrap().expect("heatmap rows");
    assert_eq!(loaded.calc_id, calc_id);
    assert_eq!(loaded.call.x_axis.values, spots.values);
    assert_eq!(loaded.call.y_axis.values, vols.values);
    assert_eq!(loaded.call.values, ms[0].values);
    assert_eq!(loaded.put.values, ms[1].values);
}

/// Sparse rows leave NaN holes rather than shifting cells.
#[test]
fn test_sparse_heatmap_fills_nan() {
    let (_dir, store) = temp_store();
    let base = atm_params();
    let calc_id = store.insert_calculation(&base, &price(base).unwrap()).unwrap();

    let cells = [
        HeatmapRecord { spot: 110.0, volatility: 0.2, call_price: 3.0, put_price: 4.0 },
        HeatmapRecord { spot: 90.0, volatility: 0.3, call_price: 1.0, put_price: 2.0 },
    ];
    store.insert_heatmap_records(calc_id, &cells).unwrap();

    let loaded = store.load_heatmap(calc_id).unwrap().unwrap();
    assert_eq!(loaded.call.x_axis.values, vec![90.0, 110.0]);
    assert_eq!(loaded.call.y_axis.values, vec![0.2, 0.3]);
    assert_eq!(loaded.call.get(0, 1), Some(3.0));
    assert_eq!(loaded.put.get(1, 0), Some(2.0));
    assert!(loaded.call.get(0, 0).unwrap().is_nan());
    assert!(loaded.call.get(1, 1).unwrap().is_nan());
}

#[test]
fn test_heatmaps_are_scoped_by_calculation() {
    let (_dir, store) = temp_store();
    let base = atm_params();
    let a = store.insert_calculation(&base, &price(base).unwrap()).unwrap();
    let b = store.insert_calculation(&base, &price(base).unwrap()).unwrap();

    let cell = |spot: f64| HeatmapRecord { spot, volatility: 0.2, call_price: spot, put_price: 0.0 };
    store.insert_heatmap_records(a, &[cell(1.0), cell(2.0)]).unwrap();
    store.insert_heatmap_records(b, &[cell(3.0)]).unwrap();

    assert_eq!(store.load_heatmap(a).unwrap().unwrap().call.cols(), 2);
    assert_eq!(store.load_heatmap(b).unwrap().unwrap().call.values, vec![vec![3.0]]);
}

#[test]
fn test_delete_cascades_to_heatmap() {
    let (_dir, store) = temp_store();
    let base = atm_params();
    let a = store.insert_calculation(&base, &price(base).unwrap()).unwrap();
    let b = store.insert_calculation(&base, &price(base).unwrap()).unwrap();
    let cell = HeatmapRecord { spot: 100.0, volatility: 0.2, call_price: 10.0, put_price: 5.0 };
    store.insert_heatmap_records(a, &[cell]).unwrap();
    store.insert_heatmap_records(b, &[cell]).unwrap();

    assert!(store.delete_calculation(a).unwrap());
    assert!(!store.delete_calculation(a).unwrap());

    assert!(store.get_calculation(a).unwrap().is_none());
    assert!(store.load_heatmap(a).unwrap().is_none());
    assert!(store.load_heatmap(b).unwrap().is_some());

    // Ids keep increasing after a delete
    let c = store.insert_calculation(&base, &price(base).unwrap()).unwrap();
    assert_eq!(c, 3);
}

#[test]
fn test_heatmap_records_rejects_misaligned() {
    let base = atm_params();
    let spots = Axis::new(ParameterField::Spot, vec![90.0, 100.0]);
    let vols = Axis::new(ParameterField::Volatility, vec![0.2]);
    let strikes = Axis::new(ParameterField::Strike, vec![90.0, 100.0]);

    let call = sweep_many(base, &spots, &vols, &[OutputField::CallPrice]).unwrap().remove(0);
    let put_other = sweep_many(base, &strikes, &vols, &[OutputField::PutPrice]).unwrap().remove(0);
    assert!(heatmap_records(&call, &put_other).is_none());

    // Swapped outputs are rejected as well
    assert!(heatmap_records(&call, &call).is_none());
}

#[test]
fn test_reinsert_replaces_previous_grid() {
    let (_dir, store) = temp_store();
    let base = atm_params();
    let a = store.insert_calculation(&base, &price(base).unwrap()).unwrap();
    let b = store.insert_calculation(&base, &price(base).unwrap()).unwrap();

    let cell = |spot: f64, volatility: f64| HeatmapRecord {
        spot,
        volatility,
        call_price: spot * volatility,
        put_price: 1.0,
    };
    store
        .insert_heatmap_records(a, &[cell(90.0, 0.1), cell(110.0, 0.3)])
        .unwrap();
    store.insert_heatmap_records(b, &[cell(70.0, 0.5)]).unwrap();
    store
        .insert_heatmap_records(a, &[cell(100.0, 0.2), cell(105.0, 0.2)])
        .unwrap();

    let reloaded = store.load_heatmap(a).unwrap().unwrap();
    assert_eq!(reloaded.call.x_axis.values, vec![100.0, 105.0]);
    assert_eq!(reloaded.call.y_axis.values, vec![0.2]);
    assert!(reloaded.call.values.iter().flatten().all(|v| v.is_finite()));

    // Other calculations keep their rows
    assert_eq!(store.load_heatmap(b).unwrap().unwrap().call.values, vec![vec![35.0]]);
}
