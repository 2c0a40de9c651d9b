use std::collections::HashMap;
use std::sync::Arc;

use session::auth::domain::{
    RegisterResponse, RegistrationProfile, Role, SessionStatus,
};
use session::client::mock::MockIdentityClient;
use session::storage::memory::MemoryStore;
use session::{Navigation, Route, SessionError, SessionManager};

fn success() -> RegisterResponse {
    serde_json::from_str(r#"{"status":"success","message":"Registration completed"}"#)
        .expect("register response")
}

#[tokio::test]
async fn successful_registration_pushes_login_and_creates_no_session() {
    common::logging::init_logging_default();
    let store = Arc::new(MemoryStore::default());
    let client = MockIdentityClient::with_register(Ok(success()));
    let mut manager = SessionManager::new(Arc::new(client), store.clone());
    manager.init().await;

    let nav = manager
        .register("0512345678", "secret", RegistrationProfile::default())
        .await
        .expect("register");

    // back-navigation must stay possible, so this is a push
    assert_eq!(nav, Navigation::Push(Route::Login));
    assert!(!manager.is_authenticated());
    assert!(store.is_empty());
    assert_eq!(manager.status(), SessionStatus::Idle);
    assert!(!manager.is_loading());
}

#[tokio::test]
async fn driver_registration_includes_the_vehicle_bundle() {
    let client = Arc::new(MockIdentityClient::with_register(Ok(success())));
    let mut manager = SessionManager::new(client.clone(), Arc::new(MemoryStore::default()));
    manager.init().await;

    let profile = RegistrationProfile {
        first_name: Some("Omar".into()),
        last_name: Some("Alfarsi".into()),
        role: Some(Role::Driver),
        plate_number: Some("ABC-1234".into()),
        car_make: Some("Toyota".into()),
        car_model: Some("Camry".into()),
        car_year: Some("2021".into()),
        car_color: Some("White".into()),
        license_document_url: Some("https://cdn.example.sa/license.pdf".into()),
        registration_document_url: Some("https://cdn.example.sa/registration.pdf".into()),
        driver_photo_url: Some("https://cdn.example.sa/photo.jpg".into()),
        driver_documents: Some(HashMap::from([(
            "license".to_string(),
            "https://cdn.example.sa/license.pdf".to_string(),
        )])),
        temp_registration_id: Some("tmp-77".into()),
        ..Default::default()
    };
    manager.register("0512345678", "secret", profile).await.expect("register");

    let calls = client.register_calls();
    assert_eq!(calls.len(), 1);
    let payload = serde_json::to_value(&calls[0]).expect("serialize request");
    assert_eq!(payload["name"], "Omar Alfarsi");
    assert_eq!(payload["phone"], "+966512345678");
    assert_eq!(payload["role"], "DRIVER");
    assert_eq!(payload["plateNumber"], "ABC-1234");
    assert_eq!(payload["carMake"], "Toyota");
    assert_eq!(payload["carYear"], "2021");
    assert_eq!(payload["registrationDocumentUrl"], "https://cdn.example.sa/registration.pdf");
    assert_eq!(payload["driverPhotoUrl"], "https://cdn.example.sa/photo.jpg");
    assert_eq!(payload["driverDocuments"]["license"], "https://cdn.example.sa/license.pdf");
    assert_eq!(payload["tempRegistrationId"], "tmp-77");
}

#[tokio::test]
async fn client_registration_excludes_the_driver_bundle() {
    let client = Arc::new(MockIdentityClient::with_register(Ok(success())));
    let mut manager = SessionManager::new(client.clone(), Arc::new(MemoryStore::default()));
    manager.init().await;

    // role left unset defaults to CLIENT
    let profile = RegistrationProfile {
        name: Some("Sara".into()),
        plate_number: Some("should-be-dropped".into()),
        ..Default::default()
    };
    manager.register("512345678", "secret", profile).await.expect("register");

    let payload = serde_json::to_value(&client.register_calls()[0]).expect("serialize request");
    assert_eq!(payload["role"], "CLIENT");
    assert!(payload.get("plateNumber").is_none());
    assert!(payload.get("driverDocuments").is_none());
    assert!(payload.get("tempRegistrationId").is_none());
}

#[tokio::test]
async fn rejected_registration_surfaces_the_remote_message() {
    let rejected: RegisterResponse =
        serde_json::from_str(r#"{"status":"error","message":"Phone already registered"}"#)
            .expect("register response");
    let client = MockIdentityClient::with_register(Ok(rejected));
    let mut manager = SessionManager::new(Arc::new(client), Arc::new(MemoryStore::default()));
    manager.init().await;

    let err = manager
        .register("0512345678", "secret", RegistrationProfile::default())
        .await
        .expect_err("must fail");

    assert!(matches!(err, SessionError::RemoteRejected(_)));
    assert_eq!(manager.last_error(), Some("Phone already registered"));
    assert_eq!(manager.status(), SessionStatus::Error);
    assert!(!manager.is_loading());
}

#[tokio::test]
async fn rejection_without_a_message_falls_back_to_generic_text() {
    let rejected: RegisterResponse =
        serde_json::from_str(r#"{"status":"error"}"#).expect("register response");
    let client = MockIdentityClient::with_register(Ok(rejected));
    let mut manager = SessionManager::new(Arc::new(client), Arc::new(MemoryStore::default()));
    manager.init().await;

    manager
        .register("0512345678", "secret", RegistrationProfile::default())
        .await
        .expect_err("must fail");
    assert_eq!(manager.last_error(), Some("Registration failed"));
}

#[tokio::test]
async fn transport_failure_during_registration_propagates() {
    let client = MockIdentityClient::with_register(Err(SessionError::Transport {
        message: "identity service returned 503".into(),
        detail: None,
    }));
    let mut manager = SessionManager::new(Arc::new(client), Arc::new(MemoryStore::default()));
    manager.init().await;

    let err = manager
        .register("0512345678", "secret", RegistrationProfile::default())
        .await
        .expect_err("must fail");
    assert!(matches!(err, SessionError::Transport { .. }));
    assert_eq!(manager.last_error(), Some("identity service returned 503"));
    assert!(!manager.is_loading());
}
