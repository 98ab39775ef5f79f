//! POST and IHAVE submission, including on-the-wire dot-stuffing

use crate::common::{self, Step};
use nntp_client::NntpError;

/// A body line starting with `.` crosses the wire doubled.
#[tokio::test]
async fn post_stuffs_dotted_lines() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("POST"),
        Step::Send("340 send it\r\n"),
        Step::ExpectBody(vec![
            "From: alice@example",
            "Newsgroups: misc.test",
            "Subject: quiet",
            "",
            "before",
            "..quiet",
            "after",
        ]),
        Step::Send("240 article posted\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let article = "From: alice@example\n\
                   Newsgroups: misc.test\n\
                   Subject: quiet\n\
                   \n\
                   before\n\
                   .quiet\n\
                   after";

    let mut client = common::connect(server.addr).await.unwrap();
    client.post(article).await.unwrap();
    server.finish().await;
}

#[tokio::test]
async fn post_not_permitted_is_a_temporary_failure() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("POST"),
        Step::Send("440 posting not permitted\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let err = client.post("Subject: x\n\nbody").await.unwrap_err();
    assert!(matches!(err, NntpError::Temporary { code: 440, .. }));
    // Nothing but the POST line went out; the session keeps working
    assert!(client.is_connected());
    server.finish().await;
}

#[tokio::test]
async fn post_rejection_after_the_body() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("POST"),
        Step::Send("340 send it\r\n"),
        Step::ExpectBody(vec!["Subject: x", "", "body"]),
        Step::Send("441 posting failed\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let err = client.post("Subject: x\n\nbody").await.unwrap_err();
    assert!(matches!(err, NntpError::Temporary { code: 441, .. }));
    server.finish().await;
}

#[tokio::test]
async fn ihave_transfers_an_article() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("IHAVE <offer@example>"),
        Step::Send("335 send it\r\n"),
        Step::ExpectBody(vec!["Subject: offered", "", "payload"]),
        Step::Send("235 article transferred\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    client
        .ihave("<offer@example>", "Subject: offered\n\npayload")
        .await
        .unwrap();
    server.finish().await;
}

#[tokio::test]
async fn ihave_unwanted_article_is_not_sent() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("IHAVE <dup@example>"),
        Step::Send("435 article not wanted\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let err = client
        .ihave("<dup@example>", "Subject: dup\n\nbody")
        .await
        .unwrap_err();
    assert!(matches!(err, NntpError::Temporary { code: 435, .. }));
    server.finish().await;
}
