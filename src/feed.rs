//! RSS 2.0 feed rendering.
//!
//! Stage 3 of a run. Turns the published items into `feed.xml`:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <rss version="2.0">
//!   <channel>
//!     <title>Daily Yoto Mix</title>
//!     <link>https://owner.github.io/repo</link>
//!     <description>Rotating daily subset of my MP3s for Yoto</description>
//!     <lastBuildDate>Mon, 19 Oct 2026 08:00:00 GMT</lastBuildDate>
//!     <item>
//!       <title>My Song 01</title>
//!       <pubDate>Mon, 19 Oct 2026 08:00:00 GMT</pubDate>
//!       <guid isPermaLink="false">https://owner.github.io/repo/My_Song-01.mp3#My_Song-01.mp3</guid>
//!       <enclosure url="https://owner.github.io/repo/My_Song-01.mp3" length="1234" type="audio/mpeg" />
//!     </item>
//!   </channel>
//! </rss>
//! ```
//!
//! The render timestamp is a parameter, so output is reproducible for a
//! given input. Every item shares the build timestamp as its `pubDate`.
//!
//! Text nodes are escaped for `&`, `<` and `>`; attribute values also escape
//! quotes. Filenames with those characters still produce well-formed XML.

use crate::types::{Channel, FeedItem};
use chrono::{DateTime, Utc};
use quick_xml::escape::{escape, partial_escape};
use std::fmt::Write;

/// Name of the feed document inside the output directory.
pub const FEED_FILENAME: &str = "feed.xml";

/// MIME type for every enclosure.
pub const AUDIO_MIME: &str = "audio/mpeg";

/// Format a timestamp per RFC 2822 with a literal `GMT` zone.
pub fn rfc2822(moment: DateTime<Utc>) -> String {
    moment.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Render the complete feed document.
pub fn render(items: &[FeedItem], channel: &Channel, now: DateTime<Utc>) -> String {
    let stamp = rfc2822(now);
    let mut xml = String::with_capacity(512 + items.len() * 384);

    // fmt::Write into a String cannot fail
    let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(xml, r#"<rss version="2.0">"#);
    let _ = writeln!(xml, "  <channel>");
    let _ = writeln!(xml, "    <title>{}</title>", partial_escape(&channel.title));
    let _ = writeln!(xml, "    <link>{}</link>", partial_escape(&channel.link));
    let _ = writeln!(
        xml,
        "    <description>{}</description>",
        partial_escape(&channel.description)
    );
    let _ = writeln!(xml, "    <lastBuildDate>{stamp}</lastBuildDate>");
    for item in items {
        render_item(&mut xml, item, &stamp);
    }
    let _ = writeln!(xml, "  </channel>");
    let _ = writeln!(xml, "</rss>");
    xml
}

fn render_item(xml: &mut String, item: &FeedItem, pub_date: &str) {
    let _ = writeln!(xml, "    <item>");
    let _ = writeln!(xml, "      <title>{}</title>", partial_escape(&item.title));
    let _ = writeln!(xml, "      <pubDate>{pub_date}</pubDate>");
    let _ = writeln!(
        xml,
        r#"      <guid isPermaLink="false">{}</guid>"#,
        partial_escape(&item.guid())
    );
    let _ = writeln!(
        xml,
        r#"      <enclosure url="{}" length="{}" type="{AUDIO_MIME}" />"#,
        escape(&item.public_url),
        item.byte_length
    );
    let _ = writeln!(xml, "    </item>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 5, 9).unwrap()
    }

    fn channel() -> Channel {
        Channel {
            title: "Daily Mix".to_string(),
            link: "https://host".to_string(),
            description: "Some songs".to_string(),
        }
    }

    fn item(filename: &str, length: u64) -> FeedItem {
        FeedItem::new(filename, length, "https://host")
    }

    /// Parse the whole document, failing on malformed XML, and count `<item>`s.
    fn count_items(xml: &str) -> usize {
        let mut reader = Reader::from_str(xml);
        let mut count = 0;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"item" => count += 1,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("malformed feed: {e}\n{xml}"),
            }
        }
        count
    }

    #[test]
    fn rfc2822_uses_gmt_suffix() {
        assert_eq!(rfc2822(fixed_now()), "Mon, 19 Oct 2026 08:05:09 GMT");
    }

    #[test]
    fn single_item_guid_and_enclosure() {
        let xml = render(&[item("a.mp3", 1234)], &channel(), fixed_now());

        assert_eq!(xml.matches("<item>").count(), 1);
        assert!(xml.contains(r#"<guid isPermaLink="false">https://host/a.mp3#a.mp3</guid>"#));
        assert!(xml.contains(
            r#"<enclosure url="https://host/a.mp3" length="1234" type="audio/mpeg" />"#
        ));
        assert!(xml.contains("<title>a</title>"));
    }

    #[test]
    fn full_document_layout() {
        let xml = render(&[item("My_Song-01.mp3", 7)], &channel(), fixed_now());
        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<rss version=\"2.0\">
  <channel>
    <title>Daily Mix</title>
    <link>https://host</link>
    <description>Some songs</description>
    <lastBuildDate>Mon, 19 Oct 2026 08:05:09 GMT</lastBuildDate>
    <item>
      <title>My Song 01</title>
      <pubDate>Mon, 19 Oct 2026 08:05:09 GMT</pubDate>
      <guid isPermaLink=\"false\">https://host/My_Song-01.mp3#My_Song-01.mp3</guid>
      <enclosure url=\"https://host/My_Song-01.mp3\" length=\"7\" type=\"audio/mpeg\" />
    </item>
  </channel>
</rss>
";
        assert_eq!(xml, expected);
    }

    #[test]
    fn items_keep_input_order() {
        let items = vec![item("z.mp3", 1), item("a.mp3", 2), item("m.mp3", 3)];
        let xml = render(&items, &channel(), fixed_now());

        let z = xml.find("<title>z</title>").unwrap();
        let a = xml.find("<title>a</title>").unwrap();
        let m = xml.find("<title>m</title>").unwrap();
        assert!(z < a && a < m);
        assert_eq!(count_items(&xml), 3);
    }

    #[test]
    fn empty_feed_is_well_formed() {
        let xml = render(&[], &channel(), fixed_now());
        assert_eq!(count_items(&xml), 0);
        assert!(xml.contains("<lastBuildDate>"));
    }

    #[test]
    fn special_characters_are_escaped() {
        let mut ch = channel();
        ch.title = "Rock & <Roll>".to_string();
        let xml = render(&[item("Tom & \"Jerry\".mp3", 5)], &ch, fixed_now());

        assert!(xml.contains("<title>Rock &amp; &lt;Roll&gt;</title>"));
        assert!(xml.contains("<title>Tom &amp; \"Jerry\"</title>"));
        assert!(xml.contains(r#"url="https://host/Tom &amp; &quot;Jerry&quot;.mp3""#));
        assert!(xml.contains(
            r#"<guid isPermaLink="false">https://host/Tom &amp; "Jerry".mp3#Tom &amp; "Jerry".mp3</guid>"#
        ));
        assert_eq!(count_items(&xml), 1);
    }

    #[test]
    fn every_pub_date_matches_build_date() {
        let items = vec![item("a.mp3", 1), item("b.mp3", 2)];
        let xml = render(&items, &channel(), fixed_now());
        assert_eq!(
            xml.matches("<pubDate>Mon, 19 Oct 2026 08:05:09 GMT</pubDate>")
                .count(),
            2
        );
    }
}
