//! OVER/XOVER, overview format negotiation, XHDR, and article retrieval

use crate::common::{self, Step};
use nntp_client::{ArticleRange, ArticleRef, DataError, NntpError};

const FMT_DEFAULT: &str = "215 order of fields\r\nSubject:\r\nFrom:\r\nDate:\r\nMessage-ID:\r\nReferences:\r\n:bytes\r\n:lines\r\n.\r\n";

/// Without the OVER capability the wire shows XOVER, and the
/// payload parses against the default descriptor.
#[tokio::test]
async fn over_falls_back_to_xover() {
    let caps_no_over = "101 capabilities\r\nVERSION 2\r\nREADER\r\n.\r\n";
    let mut script = common::prelude(common::BANNER_OK, caps_no_over);
    script.extend([
        Step::Expect("LIST OVERVIEW.FMT"),
        Step::Send(FMT_DEFAULT),
        Step::Expect("XOVER 1-3"),
        Step::Send(
            "224 overview follows\r\n\
             1\tfirst post\talice@example\ttoday\t<one@example>\t\t100\t5\r\n\
             2\tsecond post\tbob@example\ttoday\t<two@example>\t<one@example>\t200\t10\r\n\
             .\r\n",
        ),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let entries = client.over(&ArticleRange::from(1..=3)).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].article_number, 1);
    assert_eq!(entries[0].get("subject"), Some("first post"));
    assert_eq!(entries[0].get("references"), Some(""));
    assert_eq!(entries[1].get(":bytes"), Some("200"));
    assert_eq!(entries[1].get(":lines"), Some("10"));
    server.finish().await;
}

#[tokio::test]
async fn over_is_preferred_when_advertised() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("LIST OVERVIEW.FMT"),
        Step::Send(FMT_DEFAULT),
        Step::Expect("OVER 1-3"),
        Step::Send("224 overview follows\r\n.\r\n"),
        // The format is cached: the second call goes straight to OVER
        Step::Expect("OVER 4"),
        Step::Send("224 overview follows\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    client.over(&(1..=3).into()).await.unwrap();
    client.over(&4.into()).await.unwrap();
    server.finish().await;
}

/// A server that cannot answer LIST OVERVIEW.FMT gets the default layout.
#[tokio::test]
async fn format_negotiation_failure_falls_back_to_default() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("LIST OVERVIEW.FMT"),
        Step::Send("503 overview format not available\r\n"),
        Step::Expect("OVER 7"),
        Step::Send("224 overview follows\r\n7\tS\tF\tD\t<m@x>\t\t1\t2\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let entries = client.over(&7.into()).await.unwrap();
    assert_eq!(entries[0].get("subject"), Some("S"));
    server.finish().await;
}

/// An answer whose first seven fields deviate from the defaults is a data
/// error, not something to paper over.
#[tokio::test]
async fn invalid_overview_format_is_a_data_error() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("LIST OVERVIEW.FMT"),
        Step::Send("215 order of fields\r\nFrom:\r\nSubject:\r\nDate:\r\nMessage-ID:\r\nReferences:\r\n:bytes\r\n:lines\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let err = client.over(&1.into()).await.unwrap_err();
    assert!(matches!(
        err,
        NntpError::Data(DataError::OverviewFmtInvalid(_))
    ));
    server.finish().await;
}

/// Extended columns announced as `Xref:full` echo the header name, which
/// is stripped from the parsed value.
#[tokio::test]
async fn extended_overview_column_prefix_is_stripped() {
    let fmt_xref = "215 order of fields\r\nSubject:\r\nFrom:\r\nDate:\r\nMessage-ID:\r\nReferences:\r\n:bytes\r\n:lines\r\nXref:full\r\n.\r\n";
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("LIST OVERVIEW.FMT"),
        Step::Send(fmt_xref),
        Step::Expect("OVER 123"),
        Step::Send(
            "224 overview follows\r\n\
             123\tS\tF\tD\tM\tR\t12\t34\tXref: news.example foo.bar:1\r\n\
             .\r\n",
        ),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let entries = client.over(&123.into()).await.unwrap();
    assert_eq!(entries[0].get("xref"), Some("news.example foo.bar:1"));
    server.finish().await;
}

#[tokio::test]
async fn xhdr_keeps_malformed_lines_raw() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("XHDR Subject 1-3"),
        Step::Send("221 headers follow\r\n1 first subject\r\n2 second subject\r\n(none)\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let entries = client.xhdr("Subject", &(1..=3).into()).await.unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].article_number, Some(1));
    assert_eq!(entries[0].value, "first subject");
    assert_eq!(entries[2].article_number, None);
    assert_eq!(entries[2].value, "(none)");
    server.finish().await;
}

#[tokio::test]
async fn article_splits_headers_and_body() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("ARTICLE 5"),
        Step::Send(
            "220 5 <five@example> article\r\n\
             From: alice@example\r\n\
             Subject: hello\r\n\
             \r\n\
             body one\r\n\
             ..starts with a dot\r\n\
             .\r\n",
        ),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let article = client.article(&ArticleRef::Number(5)).await.unwrap();

    assert_eq!(article.article_number, 5);
    assert_eq!(article.message_id, "<five@example>");
    assert_eq!(article.headers.get("From"), Some("alice@example"));
    assert_eq!(article.headers.get("subject"), Some("hello"));
    // Dot-stuffing was removed on receive
    assert_eq!(article.body, vec!["body one", ".starts with a dot"]);
    server.finish().await;
}

#[tokio::test]
async fn head_parses_ordered_headers() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("HEAD 5"),
        Step::Send(
            "221 5 <five@example> head\r\nPath: news!not-for-mail\r\nFrom: alice@example\r\n.\r\n",
        ),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let head = client.head(&5.into()).await.unwrap();
    let names: Vec<&str> = head.headers.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Path", "From"]);
    server.finish().await;
}

#[tokio::test]
async fn body_into_streams_lines_with_crlf() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("BODY 5"),
        Step::Send("222 5 <five@example> body\r\nline one\r\n..dotted\r\n.\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let mut sink = Vec::new();
    let stat = client.body_into(&5.into(), &mut sink).await.unwrap();

    assert_eq!(stat.article_number, 5);
    assert_eq!(sink, b"line one\r\n.dotted\r\n");
    server.finish().await;
}

#[tokio::test]
async fn missing_article_is_a_temporary_failure() {
    let mut script = common::prelude(common::BANNER_OK, common::CAPS_READER);
    script.extend([
        Step::Expect("ARTICLE <gone@example>"),
        Step::Send("430 no such article\r\n"),
    ]);
    let server = common::ScriptedServer::start(script).await;

    let mut client = common::connect(server.addr).await.unwrap();
    let err = client
        .article(&ArticleRef::message_id("gone@example"))
        .await
        .unwrap_err();
    assert!(matches!(err, NntpError::Temporary { code: 430, .. }));
    server.finish().await;
}
