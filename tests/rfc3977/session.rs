//! Session lifecycle: banner validation, capability cache, DATE, HELP,
//! SLAVE, MODE READER, QUIT

use crate::common::{self, Step};
use nntp_client::{DataError, NntpError};

#[tokio::test]
async fn banner_and_capabilities_populate_the_session() {
    // 200 banner, VERSION 2 capabilities
    let mut script = common::prelude(
        common::BANNER_OK,
        "101 capabilities\r\nVERSION 2\r\nREADER\r\nIMPLEMENTATION INN 2.6.3\r\n.\r\n",
    );
    script.push(Step::Expect("QUIT"));
    script.push(Step::Send("205 bye\r\n"));
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    assert_eq!(client.banner(), "200 news.example ready (posting ok)");
    assert!(client.posting_allowed());
    assert_eq!(client.nntp_version(), 2);
    assert_eq!(client.nntp_implementation().as_deref(), Some("INN 2.6.3"));
    assert!(client.is_connected());
    assert!(!client.is_tls());
    assert!(!client.is_authenticated());

    client.quit().await.unwrap();
    assert!(!client.is_connected());
    server.finish().await;
}

#[tokio::test]
async fn banner_201_forbids_posting() {
    let script = common::prelude("201 ready (no posting)\r\n", common::CAPS_READER);
    let server = common::ScriptedServer::start(script).await;

    let client = common::connect(server.addr).await.unwrap();
    assert!(!client.posting_allowed());
    server.finish().await;
}

#[tokio::test]
async fn error_banner_fails_the_connect() {
    let server =
        common::ScriptedServer::start(vec![Step::Send("400 service shutting down\r\n")]).await;

    let err = common::connect(server.addr).await.unwrap_err();
    assert!(matches!(err, NntpError::Temporary { code: 400, .. }));
    server.finish().await;
}

#[tokio::test]
async fn garbage_banner_is_a_protocol_violation() {
    let server = common::ScriptedServer::start(vec![Step::Send("hello there\r\n")]).await;

    let err = common::connect(server.addr).await.unwrap_err();
    assert!(matches!(err, NntpError::Protocol(_)));
    server.finish().await;
}

#[tokio::test]
async fn old_server_without_capabilities_gets_an_empty_map() {
    let server = common::ScriptedServer::start(vec![
        Step::Send(common::BANNER_OK),
        Step::Expect("CAPABILITIES"),
        Step::Send("500 what?\r\n"),
    ])
    .await;

    let client = common::connect(server.addr).await.unwrap();
    assert_eq!(client.nntp_version(), 1);
    assert!(client.capabilities().is_some());
    assert!(client.capabilities().unwrap().list().is_empty());
    server.finish().await;
}

/// A DATE reply that is not exactly fourteen digits is a data
/// error and the session stays usable.
#[tokio::test]
async fn malformed_date_leaves_the_session_usable() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("DATE"),
        Step::Send("111 20240101\r\n"),
        Step::Expect("GROUP misc.test"),
        Step::Send("211 42 1 42 misc.test\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let err = client.date().await.unwrap_err();
    assert!(matches!(err, NntpError::Data(DataError::BadDate(_))));

    assert!(client.is_connected());
    let group = client.group("misc.test").await.unwrap();
    assert_eq!(group.count, 42);
    server.finish().await;
}

#[tokio::test]
async fn date_parses_the_fourteen_digit_stamp() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("DATE"),
        Step::Send("111 20240615083045\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let stamp = client.date().await.unwrap();
    assert_eq!(
        stamp,
        chrono::NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(8, 30, 45)
            .unwrap()
    );
    server.finish().await;
}

/// A short status where a long response is required fails without any
/// attempt to read a payload; the session keeps working.
#[tokio::test]
async fn short_reply_to_a_long_command_is_a_reply_error() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("HELP"),
        Step::Send("202 not help at all\r\n"),
        Step::Expect("GROUP misc.test"),
        Step::Send("211 42 1 42 misc.test\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let err = client.help().await.unwrap_err();
    assert!(matches!(err, NntpError::Reply(_)));

    // Had the client tried to read a payload it would be desynced here
    let group = client.group("misc.test").await.unwrap();
    assert_eq!(group.name, "misc.test");
    server.finish().await;
}

#[tokio::test]
async fn help_reads_the_long_payload() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("HELP"),
        Step::Send("100 help follows\r\nGROUP\r\nLIST\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let lines = client.help().await.unwrap();
    assert_eq!(lines, vec!["GROUP", "LIST"]);
    server.finish().await;
}

#[tokio::test]
async fn slave_is_acknowledged_with_202() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([Step::Expect("SLAVE"), Step::Send("202 noted\r\n")]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    client.slave().await.unwrap();
    server.finish().await;
}

/// MODE READER runs at connect when requested and READER is not advertised,
/// and a successful switch reloads the capability cache on the wire.
#[tokio::test]
async fn mode_reader_switch_reloads_capabilities() {
    let mut script = common::prelude(
        common::BANNER_OK,
        "101 capabilities\r\nVERSION 2\r\n.\r\n",
    );
    script.extend([
        Step::Expect("MODE READER"),
        Step::Send("201 reader mode, no posting\r\n"),
        Step::Expect("CAPABILITIES"),
        Step::Send("101 capabilities\r\nVERSION 2\r\nREADER\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let client = common::connect_with(server.addr, |c| c.reader_mode = true)
        .await
        .unwrap();
    assert!(!client.posting_allowed());
    assert!(client.capabilities().unwrap().has("READER"));
    server.finish().await;
}

#[tokio::test]
async fn mode_reader_skipped_when_reader_is_advertised() {
    // The script has no MODE READER step; any attempt would panic the server
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([Step::Expect("QUIT"), Step::Send("205 bye\r\n")]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect_with(server.addr, |c| c.reader_mode = true)
        .await
        .unwrap();
    client.quit().await.unwrap();
    server.finish().await;
}

#[tokio::test]
async fn quit_closes_even_when_the_server_reply_is_missing() {
    // Server ends the script (and the connection) without answering QUIT
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.push(Step::Expect("QUIT"));
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    client.quit().await.unwrap();
    assert!(!client.is_connected());

    // Idempotent
    client.quit().await.unwrap();
    server.finish().await;
}

/// Two sequential commands always hit the wire in call order; the script
/// would panic on any reordering.
#[tokio::test]
async fn wire_traffic_follows_call_order() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("GROUP misc.test"),
        Step::Send("211 42 1 42 misc.test\r\n"),
        Step::Expect("STAT 1"),
        Step::Send("223 1 <first@example> ok\r\n"),
        Step::Expect("NEXT"),
        Step::Send("223 2 <second@example> ok\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    client.group("misc.test").await.unwrap();
    client.stat(&1.into()).await.unwrap();
    let stat = client.next().await.unwrap();
    assert_eq!(stat.article_number, 2);
    server.finish().await;
}
