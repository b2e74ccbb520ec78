use seqkit::{forward_list, vector, ForwardList, Vector};

#[cfg_attr(test, test)]
fn main() {
    let mut queue: ForwardList<Track> = forward_list![
        Track::new("intro", 40),
        Track::new("verse", 180),
        Track::new("outro", 35),
    ];

    // Slot a bridge in after the verse.
    let mut cursor = queue.cursor_front_mut();
    while cursor.current().is_some_and(|track| track.name != "verse") {
        cursor.move_next();
    }
    cursor.emplace_after(("bridge", 60));

    // Drop anything too short to keep.
    let mut cursor = queue.cursor_before_front_mut();
    while let Some(next) = cursor.peek_next() {
        if next.seconds < 45 {
            cursor.delete_next();
        } else {
            cursor.move_next();
        }
    }
    println!("{queue:?}");

    let mut lengths: Vector<u32> = queue.iter().map(|track| track.seconds).collect();
    lengths.extend_from_slice(&[120, 90]);
    lengths.resize(8, 0);
    println!("{lengths:?} (capacity {})", lengths.capacity());

    assert_eq!(lengths.iter().sum::<u32>(), 180 + 60 + 120 + 90);
    assert_eq!(vector![0_u32; 3], lengths[5..]);
}

#[derive(Debug)]
struct Track {
    name: &'static str,
    seconds: u32,
}

impl Track {
    const fn new(name: &'static str, seconds: u32) -> Self {
        Self { name, seconds }
    }
}

impl From<(&'static str, u32)> for Track {
    fn from((name, seconds): (&'static str, u32)) -> Self {
        Self::new(name, seconds)
    }
}
