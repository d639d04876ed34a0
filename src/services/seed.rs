//! Starter channel list inserted into an empty catalog

use crate::models::NewChannel;

const ALBANIAN_CATEGORY: &str = "Albanian";

/// (name, stream url, logo)
const ALBANIAN_CHANNELS: &[(&str, &str, &str)] = &[
    (
        "Top Channel",
        "http://80.78.76.101:8000/top_channel/index.m3u8",
        "https://upload.wikimedia.org/wikipedia/commons/2/22/Top_Channel_Albania_logo.svg",
    ),
    (
        "Vizion Plus",
        "http://80.78.76.101:8000/vizion_plus/index.m3u8",
        "https://upload.wikimedia.org/wikipedia/commons/1/1e/Vizion_Plus_logo.png",
    ),
    (
        "RTSH 1",
        "http://80.78.76.101:8000/rtsh_1/index.m3u8",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/5/52/RTSH_logo.svg/1200px-RTSH_logo.svg.png",
    ),
    (
        "Klan Kosova",
        "http://80.78.76.101:8000/klan_kosova/index.m3u8",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/6/66/Klan_Kosova_Logo.svg/2560px-Klan_Kosova_Logo.svg.png",
    ),
    (
        "News 24",
        "http://80.78.76.101:8000/news_24/index.m3u8",
        "https://upload.wikimedia.org/wikipedia/commons/5/5b/News24_Albania.png",
    ),
];

pub fn default_channels() -> Vec<NewChannel> {
    let mut channels = vec![NewChannel {
        name: "TV Klan".to_string(),
        url: "http://188.138.9.157:8081/streamrtmp/tvklan2/playlist.m3u8".to_string(),
        logo: Some(
            "https://upload.wikimedia.org/wikipedia/commons/thumb/3/3a/TV_Klan_logo.svg/1200px-TV_Klan_logo.svg.png"
                .to_string(),
        ),
        category: Some("General".to_string()),
        user_agent: None,
        is_favorite: true,
    }];

    channels.extend(ALBANIAN_CHANNELS.iter().map(|(name, url, logo)| NewChannel {
        name: name.to_string(),
        url: url.to_string(),
        logo: Some(logo.to_string()),
        category: Some(ALBANIAN_CATEGORY.to_string()),
        user_agent: None,
        is_favorite: false,
    }));

    channels
}
