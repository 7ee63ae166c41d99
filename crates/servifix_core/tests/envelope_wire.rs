use chrono::NaiveDate;
use servifix_core::{
    AccountSummary, ApiResponse, ErrorKind, NotificationRequest, NotificationResponse, Status,
};

#[test]
fn success_envelope_uses_expected_wire_fields() {
    let response = ApiResponse::success(
        "Notification fetched successfully",
        Some(NotificationResponse {
            id: 5,
            title: "Maintenance".to_string(),
            content: "Pipes".to_string(),
            date: NaiveDate::from_ymd_opt(2030, 1, 2).unwrap(),
            account: AccountSummary {
                id: 1,
                username: "alice".to_string(),
            },
        }),
    );

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "SUCCESS");
    assert_eq!(json["message"], "Notification fetched successfully");
    assert_eq!(json["data"]["id"], 5);
    assert_eq!(json["data"]["date"], "2030-01-02");
    assert_eq!(json["data"]["account"]["username"], "alice");
    assert!(json.get("error_kind").is_none());

    let decoded: ApiResponse<NotificationResponse> = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, response);
}

#[test]
fn error_envelope_has_null_data_and_kind() {
    let response: ApiResponse<NotificationResponse> =
        ApiResponse::error(ErrorKind::NotFound, "Notification not found");

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "ERROR");
    assert!(json["data"].is_null());
    assert_eq!(json["error_kind"], "NOT_FOUND");
    assert_eq!(response.status, Status::Error);
}

#[test]
fn request_reads_account_id_field() {
    let request: NotificationRequest = serde_json::from_value(serde_json::json!({
        "title": "Maintenance",
        "content": "Pipes",
        "date": "2030-01-02",
        "accountId": 1
    }))
    .unwrap();

    assert_eq!(request.account_id, 1);
    assert_eq!(request.date, NaiveDate::from_ymd_opt(2030, 1, 2).unwrap());
}
