/// A playlist entry. Media and cover are remote URLs; media is streamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub id: &'static str,
    pub title: &'static str,
    pub artist: &'static str,
    pub url: &'static str,
    pub cover: &'static str,
}

pub static TRACKS: [Track; 3] = [
    Track {
        id: "1",
        title: "Lofi Study",
        artist: "Spirit Beats",
        url: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3",
        cover: "https://picsum.photos/seed/lofi/300/300",
    },
    Track {
        id: "2",
        title: "Cyberpunk Night",
        artist: "Neon Ghost",
        url: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3",
        cover: "https://picsum.photos/seed/cyber/300/300",
    },
    Track {
        id: "3",
        title: "Ambient Void",
        artist: "The Lab",
        url: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3",
        cover: "https://picsum.photos/seed/void/300/300",
    },
];
