mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;
use turnos_backend::error::AppError;

#[tokio::test]
async fn test_capacity_one_admits_single_booking() {
    let app = TestApp::new().await;
    let (user_a, token) = app.signed_in("ana", "cliente").await;
    let user_b = app.register("bruno", "cliente").await;
    let (_, _, turno_id) = app.seed_turno(&token, "lucia", 1).await;

    let first = app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": turno_id,
        "usuario_id": user_a
    }))).await;
    assert_eq!(first.status(), StatusCode::OK);
    let body = parse_body(first).await;
    assert_eq!(body["turno_id"], turno_id);
    assert_eq!(body["usuario_id"], user_a);

    let full = app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": turno_id,
        "usuario_id": user_b
    }))).await;
    assert_eq!(full.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(full).await["message"], "No hay lugares disponibles en este turno");

    let again = app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": turno_id,
        "usuario_id": user_a
    }))).await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(again).await["message"], "El usuario ya reservó este turno");

    let all = parse_body(app.send("GET", "/reservas", Some(&token), None).await).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_same_usuario_cannot_book_twice() {
    let app = TestApp::new().await;
    let (user_a, token) = app.signed_in("ana", "cliente").await;
    let (_, _, turno_id) = app.seed_turno(&token, "lucia", 5).await;

    let payload = json!({ "turno_id": turno_id, "usuario_id": user_a });

    let first = app.send("POST", "/reservas", Some(&token), Some(payload.clone())).await;
    assert_eq!(first.status(), StatusCode::OK);

    let duplicate = app.send("POST", "/reservas", Some(&token), Some(payload)).await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(duplicate).await["message"], "El usuario ya reservó este turno");
}

#[tokio::test]
async fn test_booking_unknown_turno_or_usuario_is_not_found() {
    let app = TestApp::new().await;
    let (user_a, token) = app.signed_in("ana", "cliente").await;
    let (_, _, turno_id) = app.seed_turno(&token, "lucia", 1).await;

    let no_turno = app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": 999,
        "usuario_id": user_a
    }))).await;
    assert_eq!(no_turno.status(), StatusCode::NOT_FOUND);

    let no_usuario = app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": turno_id,
        "usuario_id": 999
    }))).await;
    assert_eq!(no_usuario.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancelled_reserva_frees_the_slot() {
    let app = TestApp::new().await;
    let (user_a, token) = app.signed_in("ana", "cliente").await;
    let user_b = app.register("bruno", "cliente").await;
    let (_, _, turno_id) = app.seed_turno(&token, "lucia", 1).await;

    let first = parse_body(app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": turno_id,
        "usuario_id": user_a
    }))).await).await;
    let reserva_id = first["id"].as_i64().unwrap();

    let deleted = app.send("DELETE", &format!("/reservas/{}", reserva_id), Some(&token), None).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(parse_body(deleted).await["mensaje"], "Reserva eliminada");

    let second = app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": turno_id,
        "usuario_id": user_b
    }))).await;
    assert_eq!(second.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_moving_reserva_respects_target_capacity() {
    let app = TestApp::new().await;
    let (user_a, token) = app.signed_in("ana", "cliente").await;
    let user_b = app.register("bruno", "cliente").await;
    let (_, servicio_id, full_turno) = app.seed_turno(&token, "lucia", 1).await;

    let open_turno = parse_body(app.send("POST", "/turnos", Some(&token), Some(json!({
        "servicio_id": servicio_id,
        "fecha_hora_inicio": "2030-03-14T12:00:00",
        "duracion_minutos": 30,
        "capacidad": 1
    }))).await).await["id"].as_i64().unwrap();

    app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": full_turno,
        "usuario_id": user_a
    }))).await;
    let reserva_b = parse_body(app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": open_turno,
        "usuario_id": user_b
    }))).await).await["id"].as_i64().unwrap();

    let blocked = app.send("PUT", &format!("/reservas/{}", reserva_b), Some(&token), Some(json!({
        "turno_id": full_turno
    }))).await;
    assert_eq!(blocked.status(), StatusCode::BAD_REQUEST);

    let unchanged = parse_body(app.send("GET", &format!("/reservas/{}", reserva_b), Some(&token), None).await).await;
    assert_eq!(unchanged["turno_id"], open_turno);
}

#[tokio::test]
async fn test_capacity_cannot_drop_below_existing_reservas() {
    let app = TestApp::new().await;
    let (user_a, token) = app.signed_in("ana", "cliente").await;
    let user_b = app.register("bruno", "cliente").await;
    let (_, _, turno_id) = app.seed_turno(&token, "lucia", 3).await;

    for usuario_id in [user_a, user_b] {
        app.send("POST", "/reservas", Some(&token), Some(json!({
            "turno_id": turno_id,
            "usuario_id": usuario_id
        }))).await;
    }

    let too_low = app.send("PUT", &format!("/turnos/{}", turno_id), Some(&token), Some(json!({
        "capacidad": 1
    }))).await;
    assert_eq!(too_low.status(), StatusCode::BAD_REQUEST);

    let exact = app.send("PUT", &format!("/turnos/{}", turno_id), Some(&token), Some(json!({
        "capacidad": 2
    }))).await;
    assert_eq!(exact.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_usuario_reservas_view_lists_slot_and_servicio() {
    let app = TestApp::new().await;
    let (user_a, token) = app.signed_in("ana", "cliente").await;
    let (emprendedor_id, servicio_id, turno_id) = app.seed_turno(&token, "lucia", 2).await;

    app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": turno_id,
        "usuario_id": user_a
    }))).await;

    let response = app.send("GET", &format!("/usuarios/{}/reservas", user_a), Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    let reservas = body.as_array().unwrap();
    assert_eq!(reservas.len(), 1);
    assert_eq!(reservas[0]["turno_id"], turno_id);
    assert_eq!(reservas[0]["servicio_id"], servicio_id);
    assert_eq!(reservas[0]["servicio_nombre"], "Corte");
    assert_eq!(reservas[0]["emprendedor_id"], emprendedor_id);
    assert_eq!(reservas[0]["fecha_hora_inicio"], "2030-03-14T10:00:00");

    let missing = app.send("GET", "/usuarios/999/reservas", Some(&token), None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_usuario_removes_their_reservas() {
    let app = TestApp::new().await;
    let (_, token) = app.signed_in("ana", "cliente").await;
    let user_b = app.register("bruno", "cliente").await;
    let (_, _, turno_id) = app.seed_turno(&token, "lucia", 1).await;

    app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": turno_id,
        "usuario_id": user_b
    }))).await;

    let deleted = app.send("DELETE", &format!("/usuarios/{}", user_b), Some(&token), None).await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let all = parse_body(app.send("GET", "/reservas", Some(&token), None).await).await;
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_turno_resize_is_checked_against_reservas_at_write_time() {
    let app = TestApp::new().await;
    let (user_a, token) = app.signed_in("ana", "cliente").await;
    let user_b = app.register("bruno", "cliente").await;
    let (_, _, turno_id) = app.seed_turno(&token, "lucia", 3).await;

    // Snapshot taken before the bookings land, as a slow concurrent resize would see it.
    let mut stale = app.state.turno_repo.find_by_id(turno_id).await.unwrap().unwrap();

    for usuario_id in [user_a, user_b] {
        let response = app.send("POST", "/reservas", Some(&token), Some(json!({
            "turno_id": turno_id,
            "usuario_id": usuario_id
        }))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    stale.capacidad = 1;
    let result = app.state.turno_repo.update(&stale).await;
    assert!(matches!(
        result,
        Err(AppError::BadRequest(msg)) if msg == "No se puede reducir la capacidad a 1: ya existen 2 reservas"
    ));

    let stored = app.state.turno_repo.find_by_id(turno_id).await.unwrap().unwrap();
    assert_eq!(stored.capacidad, 3);
}

#[tokio::test]
async fn test_moving_onto_a_slot_already_held_is_a_duplicate() {
    let app = TestApp::new().await;
    let (user_a, token) = app.signed_in("ana", "cliente").await;
    let (_, servicio_id, first_turno) = app.seed_turno(&token, "lucia", 2).await;

    let second_turno = parse_body(app.send("POST", "/turnos", Some(&token), Some(json!({
        "servicio_id": servicio_id,
        "fecha_hora_inicio": "2030-03-14T12:00:00",
        "duracion_minutos": 30,
        "capacidad": 2
    }))).await).await["id"].as_i64().unwrap();

    app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": first_turno,
        "usuario_id": user_a
    }))).await;
    let reserva = parse_body(app.send("POST", "/reservas", Some(&token), Some(json!({
        "turno_id": second_turno,
        "usuario_id": user_a
    }))).await).await["id"].as_i64().unwrap();

    let response = app.send("PUT", &format!("/reservas/{}", reserva), Some(&token), Some(json!({
        "turno_id": first_turno
    }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["message"], "El usuario ya reservó este turno");

    let unchanged = parse_body(app.send("GET", &format!("/reservas/{}", reserva), Some(&token), None).await).await;
    assert_eq!(unchanged["turno_id"], second_turno);
}
