//! Extended M3U rendering for the catalog export

use crate::models::Channel;

pub const M3U_HEADER: &str = "#EXTM3U";
pub const M3U_CONTENT_TYPE: &str = "text/plain";
pub const M3U_FILENAME: &str = "playlist.m3u";

/// Render channels as an extended M3U document, preserving input order.
///
/// Each channel contributes an `#EXTINF` line and its stream URL. `tvg-logo`
/// and `group-title` are omitted when the value is absent or empty. Line breaks
/// in any value become spaces and `"` inside attributes becomes `'`, so the
/// output always has `2 * channels.len() + 1` lines.
pub fn render_playlist(channels: &[Channel]) -> String {
    let mut m3u_content = String::with_capacity(16 + channels.len() * 128);
    m3u_content.push_str(M3U_HEADER);
    m3u_content.push('\n');

    for channel in channels {
        m3u_content.push_str(&extinf_line(channel));
        m3u_content.push('\n');
        m3u_content.push_str(&single_line(&channel.url));
        m3u_content.push('\n');
    }

    m3u_content
}

fn extinf_line(channel: &Channel) -> String {
    let mut extinf_parts = vec!["#EXTINF:-1".to_string()];

    if let Some(logo) = non_empty(&channel.logo) {
        extinf_parts.push(format!("tvg-logo=\"{}\"", attribute_value(logo)));
    }
    if let Some(category) = non_empty(&channel.category) {
        extinf_parts.push(format!("group-title=\"{}\"", attribute_value(category)));
    }

    format!("{},{}", extinf_parts.join(" "), single_line(&channel.name))
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn attribute_value(value: &str) -> String {
    single_line(value).replace('"', "'")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn channel(id: i32, name: &str, logo: Option<&str>, category: Option<&str>) -> Channel {
        Channel {
            id,
            name: name.to_string(),
            url: format!("http://streams.example/{id}.m3u8"),
            logo: logo.map(str::to_string),
            category: category.map(str::to_string),
            user_agent: None,
            is_favorite: false,
        }
    }

    #[test]
    fn test_empty_catalog_is_header_only() {
        assert_eq!(render_playlist(&[]), "#EXTM3U\n");
    }

    #[test]
    fn test_full_entry_is_byte_exact() {
        let output = render_playlist(&[channel(
            1,
            "TV Klan",
            Some("http://logos.example/klan.png"),
            Some("General"),
        )]);
        assert_eq!(
            output,
            "#EXTM3U\n#EXTINF:-1 tvg-logo=\"http://logos.example/klan.png\" group-title=\"General\",TV Klan\nhttp://streams.example/1.m3u8\n"
        );
    }

    #[rstest]
    #[case(None, Some("Albanian"), "#EXTINF:-1 group-title=\"Albanian\",RTSH 1")]
    #[case(Some("http://l/x.png"), None, "#EXTINF:-1 tvg-logo=\"http://l/x.png\",RTSH 1")]
    #[case(None, None, "#EXTINF:-1,RTSH 1")]
    #[case(Some(""), Some(""), "#EXTINF:-1,RTSH 1")]
    fn test_optional_attributes_omitted(
        #[case] logo: Option<&str>,
        #[case] category: Option<&str>,
        #[case] expected: &str,
    ) {
        let output = render_playlist(&[channel(3, "RTSH 1", logo, category)]);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[1], expected);
        assert_eq!(lines[2], "http://streams.example/3.m3u8");
    }

    #[rstest]
    #[case("A\n#EXTINF:-1,Injected", None, None, "#EXTINF:-1,A #EXTINF:-1,Injected")]
    #[case("Two\r\nLines", None, None, "#EXTINF:-1,Two  Lines")]
    #[case(
        "Quoted",
        Some("http://l/\"x\".png"),
        Some("News \" tvg-id=\"fake"),
        "#EXTINF:-1 tvg-logo=\"http://l/'x'.png\" group-title=\"News ' tvg-id='fake\",Quoted"
    )]
    #[case("Logo", Some("http://l/x.png\n#EXTM3U"), None, "#EXTINF:-1 tvg-logo=\"http://l/x.png #EXTM3U\",Logo")]
    fn test_stored_values_cannot_break_entries(
        #[case] name: &str,
        #[case] logo: Option<&str>,
        #[case] category: Option<&str>,
        #[case] expected: &str,
    ) {
        let output = render_playlist(&[channel(4, name, logo, category)]);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines, ["#EXTM3U", expected, "http://streams.example/4.m3u8"]);
    }

    #[test]
    fn test_url_line_break_flattened() {
        let mut entry = channel(5, "Split", None, None);
        entry.url = "http://x/a\nhttp://evil/b".to_string();
        assert_eq!(
            render_playlist(&[entry]),
            "#EXTM3U\n#EXTINF:-1,Split\nhttp://x/a http://evil/b\n"
        );
    }

    /// Printable text, or short text carrying quotes and line breaks
    fn field_text() -> impl Strategy<Value = String> {
        prop_oneof!["\\PC{1,20}", "[a-z \"]{0,8}[\r\n][a-z \"\r\n]{0,8}"]
    }

    proptest! {
        #[test]
        fn prop_line_count_and_order(
            entries in proptest::collection::vec(
                (field_text(), proptest::option::of(field_text()), field_text()),
                0..25,
            )
        ) {
            let channels: Vec<Channel> = entries
                .iter()
                .enumerate()
                .map(|(i, (name, logo, category))| {
                    channel(i as i32 + 1, name, logo.as_deref(), Some(category))
                })
                .collect();

            let output = render_playlist(&channels);
            prop_assert!(output.starts_with("#EXTM3U\n"));

            let lines: Vec<&str> = output.lines().collect();
            prop_assert_eq!(lines.len(), 2 * channels.len() + 1);

            for (i, ch) in channels.iter().enumerate() {
                let extinf = lines[1 + 2 * i];
                let expected_suffix = format!(",{}", single_line(&ch.name));
                prop_assert!(extinf.ends_with(&expected_suffix));
                prop_assert_eq!(lines[2 + 2 * i], ch.url.as_str());
            }
        }
    }
}
