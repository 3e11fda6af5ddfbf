mod common;

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

use galleria_client::{
    ApiError, BackofficeApi, CheckoutError, CheckoutStage, ConnectivityState, HttpBackoffice,
    checkout,
};
use galleria_core::{CustomerId, GalleryId, MaterialId, Money, ValidityWindow};
use galleria_exhibitions::NewGallery;
use galleria_inventory::{ImageUpload, MaterialUpdate, NewMaterial};
use galleria_invoicing::CheckoutPlan;
use galleria_parties::NewCustomer;
use galleria_sales::Cart;

use common::StubBackend;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn lists_materials_in_backend_shape() {
    let stub = StubBackend::spawn().await;
    stub.respond(
        "GET",
        "/Material",
        200,
        json!([
            { "id": 1, "name": "Oil Lamp", "quantity": 4, "imagePath": "/img/lamp.png",
              "buyPrice": 8.0, "sellPrice": 12.5 },
            { "id": 2, "name": "Rug", "quantity": 0 }
        ])
        .to_string(),
    );

    let materials = stub.client().list_materials().await.unwrap();

    assert_eq!(materials.len(), 2);
    assert_eq!(materials[0].sell_price, Some(Money::from_minor(1250)));
    assert_eq!(materials[0].image_path.as_deref(), Some("/img/lamp.png"));
    assert_eq!(materials[1].sell_price, None);
    assert_eq!(stub.request_lines(), vec!["GET /Material"]);
}

#[tokio::test]
async fn gallery_timestamps_are_read_as_dates() {
    let stub = StubBackend::spawn().await;
    stub.respond(
        "GET",
        "/Gallery/2",
        200,
        json!({ "id": 2, "name": "Spring Fair",
                "validFrom": "2025-03-01T00:00:00", "validTo": "2025-03-31" })
        .to_string(),
    );

    let gallery = stub.client().get_gallery(GalleryId::new(2)).await.unwrap();

    assert_eq!(gallery.window.valid_from, date(2025, 3, 1));
    assert_eq!(gallery.window.valid_to, date(2025, 3, 31));
}

#[tokio::test]
async fn create_gallery_posts_plain_dates() {
    let stub = StubBackend::spawn().await;
    let gallery = NewGallery {
        name: "Autumn".to_string(),
        window: ValidityWindow::new(date(2025, 9, 1), date(2025, 9, 30)).unwrap(),
    };

    stub.client().create_gallery(&gallery).await.unwrap();

    let requests = stub.requests();
    assert_eq!(requests[0].path, "/Gallery");
    assert_eq!(
        requests[0].json(),
        json!({ "name": "Autumn", "validFrom": "2025-09-01", "validTo": "2025-09-30" })
    );
}

#[tokio::test]
async fn duplicate_customer_is_a_conflict() {
    let stub = StubBackend::spawn().await;
    stub.respond(
        "POST",
        "/Customers",
        400,
        json!({ "message": "Customer with this ID already exists" }).to_string(),
    );
    let customer = NewCustomer {
        id: CustomerId::parse("29801011234567").unwrap(),
        name: "Mona".to_string(),
        relative_id: None,
    };

    let err = stub.client().create_customer(&customer).await.unwrap_err();

    assert!(matches!(err, ApiError::Conflict(ref m) if m.contains("already exists")));
    assert_eq!(stub.requests()[0].json()["id"], "29801011234567");
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let stub = StubBackend::spawn().await;
    stub.respond("GET", "/Material/99", 404, "");

    let err = stub.client().get_material(MaterialId::new(99)).await.unwrap_err();

    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn invalid_record_is_never_sent() {
    let stub = StubBackend::spawn().await;
    let material = NewMaterial {
        name: "   ".to_string(),
        quantity: 1,
        image_path: None,
        buy_price: None,
        sell_price: None,
    };

    let err = stub.client().create_material(&material).await.unwrap_err();

    assert!(matches!(err, ApiError::Domain(_)));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn material_update_is_multipart() {
    let stub = StubBackend::spawn().await;
    let update = MaterialUpdate {
        id: MaterialId::new(7),
        name: "Oil Lamp".to_string(),
        quantity: 3,
        image: Some(ImageUpload::from_file_name("lamp.png", b"\x89PNG".to_vec())),
    };

    stub.client().update_material(&update).await.unwrap();

    let req = &stub.requests()[0];
    assert_eq!(req.method, "PUT");
    assert_eq!(req.path, "/Material/7");
    assert!(req.content_type.starts_with("multipart/form-data"));
    assert!(req.body.contains(r#"name="quantity""#));
    assert!(req.body.contains(r#"name="imageFile"; filename="lamp.png""#));
}

#[tokio::test]
async fn delete_hits_the_record_path() {
    let stub = StubBackend::spawn().await;

    stub.client()
        .delete_customer(&CustomerId::parse("29801011234567").unwrap())
        .await
        .unwrap();

    assert_eq!(stub.request_lines(), vec!["DELETE /Customers/29801011234567"]);
}

fn sale_plan() -> CheckoutPlan {
    let customer: galleria_parties::Customer = serde_json::from_value(json!({
        "id": "29801011234567", "name": "Mona"
    }))
    .unwrap();
    let gallery: galleria_exhibitions::Gallery = serde_json::from_value(json!({
        "id": 2, "name": "Spring Fair", "validFrom": "2025-03-01", "validTo": "2025-03-31"
    }))
    .unwrap();
    let lamp: galleria_inventory::Material = serde_json::from_value(json!({
        "id": 3, "name": "Oil Lamp", "quantity": 5, "sellPrice": 12.5
    }))
    .unwrap();
    let rug: galleria_inventory::Material = serde_json::from_value(json!({
        "id": 5, "name": "Rug", "quantity": 1, "sellPrice": 3
    }))
    .unwrap();

    let mut cart = Cart::new();
    cart.add(&lamp).unwrap();
    cart.add(&lamp).unwrap();
    cart.add(&rug).unwrap();

    let at = Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap();
    CheckoutPlan::new(&cart, customer, gallery, at).unwrap()
}

#[tokio::test]
async fn checkout_calls_backend_in_order() {
    let stub = StubBackend::spawn().await;
    stub.respond("POST", "/BillHeader", 201, json!({ "id": 41 }).to_string());

    let outcome = checkout(&stub.client(), &sale_plan()).await.unwrap();

    assert_eq!(
        stub.request_lines(),
        vec![
            "POST /BillHeader",
            "POST /BillItems",
            "PUT /Material/UpdateQuantity/3",
            "POST /BillItems",
            "PUT /Material/UpdateQuantity/5",
        ]
    );
    let requests = stub.requests();
    let header = requests[0].json();
    assert_eq!(header["customerID"], "29801011234567");
    assert_eq!(header["galleryID"], 2);
    assert_eq!(header["totalAmount"], 28.0);
    assert_eq!(
        requests[1].json(),
        json!({ "billHeaderID": 41, "materialID": 3, "quantity": 2, "sellPrice": 12.5 })
    );
    assert_eq!(requests[2].json(), json!({ "quantity": 2 }));

    assert_eq!(outcome.receipt.lines.len(), 2);
    assert!(outcome.receipt.render_text("$").contains("Oil Lamp - $12.50 x 2"));
}

#[tokio::test]
async fn checkout_stops_at_first_failure() {
    let stub = StubBackend::spawn().await;
    stub.respond("POST", "/BillHeader", 201, json!({ "id": 41 }).to_string());
    stub.respond(
        "PUT",
        "/Material/UpdateQuantity/3",
        500,
        json!({ "error": "stock table locked" }).to_string(),
    );

    let err = checkout(&stub.client(), &sale_plan()).await.unwrap_err();

    match &err {
        CheckoutError::Failed {
            stage,
            bill_header_id,
            lines_booked,
            source,
        } => {
            assert_eq!(*stage, CheckoutStage::StockUpdate(MaterialId::new(3)));
            assert_eq!(bill_header_id.map(|id| id.get()), Some(41));
            assert_eq!(*lines_booked, 0);
            assert!(
                matches!(source, ApiError::Status { status: 500, message } if message == "stock table locked")
            );
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(stub.requests().len(), 3);
}

#[tokio::test]
async fn malformed_header_response_is_a_parse_error() {
    let stub = StubBackend::spawn().await;
    stub.respond("POST", "/BillHeader", 200, "{}");

    let err = checkout(&stub.client(), &sale_plan()).await.unwrap_err();

    match err {
        CheckoutError::Failed { stage, source, .. } => {
            assert_eq!(stage, CheckoutStage::BillHeader);
            assert!(matches!(source, ApiError::Parse(_)));
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn connectivity_reflects_reachability() {
    let stub = StubBackend::spawn().await;
    stub.respond("GET", "/Gallery", 500, "");
    assert_eq!(stub.client().check_connectivity().await, ConnectivityState::Online);

    // Grab a free port and release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpBackoffice::new(format!("http://{addr}"), std::time::Duration::from_secs(2))
        .unwrap();
    assert_eq!(api.check_connectivity().await, ConnectivityState::Offline);
}
