//! GROUP, LISTGROUP, STAT/NEXT/LAST, NEWGROUPS, NEWNEWS

use crate::common::{self, Step};
use chrono::NaiveDate;
use nntp_client::{ArticleRef, NntpError};

/// The basic reader flow: banner, capabilities, group selection.
#[tokio::test]
async fn group_returns_the_parsed_counts() {
    let mut script = common::prelude(
        "200 OK\r\n",
        "101 capabilities\r\nVERSION 2\r\nREADER\r\n.\r\n",
    );
    script.extend([
        Step::Expect("GROUP misc.test"),
        Step::Send("211 42 1 42 misc.test\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    assert_eq!(client.nntp_version(), 2);

    let group = client.group("misc.test").await.unwrap();
    assert_eq!(group.count, 42);
    assert_eq!(group.first, 1);
    assert_eq!(group.last, 42);
    assert_eq!(group.name, "misc.test");
    assert_eq!(group.raw, "211 42 1 42 misc.test");
    assert_eq!(client.current_group(), Some("misc.test"));
    server.finish().await;
}

#[tokio::test]
async fn group_name_is_lowercased() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("GROUP Misc.TEST"),
        Step::Send("211 3000 1 3000 Misc.TEST\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let group = client.group("Misc.TEST").await.unwrap();
    assert_eq!(group.name, "misc.test");
    server.finish().await;
}

#[tokio::test]
async fn missing_group_is_a_temporary_failure() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("GROUP no.such.group"),
        Step::Send("411 no such newsgroup\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let err = client.group("no.such.group").await.unwrap_err();
    assert!(matches!(err, NntpError::Temporary { code: 411, .. }));
    assert_eq!(client.current_group(), None);
    server.finish().await;
}

/// LISTGROUP is the one command where 211 carries a payload.
#[tokio::test]
async fn listgroup_reads_the_211_payload() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("LISTGROUP misc.test"),
        Step::Send("211 3 1 3 misc.test list follows\r\n1\r\n2\r\n3\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let numbers = client.listgroup(Some("misc.test"), None).await.unwrap();
    assert_eq!(numbers, vec![1, 2, 3]);
    server.finish().await;
}

#[tokio::test]
async fn listgroup_with_range() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("LISTGROUP misc.test 2-3"),
        Step::Send("211 3 1 3 misc.test list follows\r\n2\r\n3\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let numbers = client
        .listgroup(Some("misc.test"), Some("2-3"))
        .await
        .unwrap();
    assert_eq!(numbers, vec![2, 3]);
    server.finish().await;
}

#[tokio::test]
async fn stat_by_message_id() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("STAT <i.am.an.article@example>"),
        Step::Send("223 0 <i.am.an.article@example> status\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let stat = client
        .stat(&ArticleRef::message_id("i.am.an.article@example"))
        .await
        .unwrap();
    assert_eq!(stat.article_number, 0);
    assert_eq!(stat.message_id, "<i.am.an.article@example>");
    server.finish().await;
}

#[tokio::test]
async fn last_at_the_first_article_is_a_temporary_failure() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("LAST"),
        Step::Send("422 no previous article\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let err = client.last().await.unwrap_err();
    assert!(matches!(err, NntpError::Temporary { code: 422, .. }));
    server.finish().await;
}

/// The client always emits four-digit years in GMT stamps.
#[tokio::test]
async fn newgroups_formats_the_stamp() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("NEWGROUPS 20240615 083045 GMT"),
        Step::Send("231 new groups follow\r\nmisc.fresh 5 1 y\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let since = NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(8, 30, 45)
        .unwrap();

    let mut client = common::connect(server.addr).await.unwrap();
    let groups = client.newgroups(&since).await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "misc.fresh");
    assert_eq!(groups[0].high, 5);
    assert_eq!(groups[0].low, 1);
    assert_eq!(groups[0].status, "y");
    server.finish().await;
}

#[tokio::test]
async fn newnews_returns_message_ids() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("NEWNEWS misc.* 19991231 235959 GMT"),
        Step::Send("230 new articles follow\r\n<one@example>\r\n<two@example>\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let since = NaiveDate::from_ymd_opt(1999, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();

    let mut client = common::connect(server.addr).await.unwrap();
    let ids = client.newnews("misc.*", &since).await.unwrap();
    assert_eq!(ids, vec!["<one@example>", "<two@example>"]);
    server.finish().await;
}

#[tokio::test]
async fn list_active_and_newsgroup_descriptions() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("LIST ACTIVE comp.*"),
        Step::Send("215 list follows\r\ncomp.lang.rust 900 100 y\r\n.\r\n"),
        Step::Expect("LIST NEWSGROUPS comp.*"),
        Step::Send("215 descriptions follow\r\ncomp.lang.rust\tThe Rust language\r\n.\r\n"),
        Step::Expect("XGTITLE comp.*"),
        Step::Send("282 titles follow\r\ncomp.lang.rust\tThe Rust language\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();

    let active = client.list_active(Some("comp.*")).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "comp.lang.rust");

    let described = client.list_newsgroups("comp.*").await.unwrap();
    assert_eq!(described[0].description, "The Rust language");

    let titled = client.xgtitle("comp.*").await.unwrap();
    assert_eq!(titled, described);
    server.finish().await;
}
