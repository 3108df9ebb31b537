use slider::{Rect, TrackLayout, Viewport};
use sliderconfig::LayoutConfig;

/// Places `count` slides in a single row, the way the page stylesheet does:
/// the track element is one slide wide and later slides overflow it to the
/// right, all vertically centred.
pub fn layout_slides(viewport: &Viewport, layout: &LayoutConfig, count: usize) -> TrackLayout {
    let width = viewport.width * layout.slide_width;
    let height = viewport.height * layout.slide_height;
    let top = (viewport.height - height) / 2.0;
    let left = viewport.width * layout.track_left;
    let step = width * layout.spacing;

    TrackLayout {
        track: Rect::new(left, top, width, height),
        items: (0..count)
            .map(|index| Rect::new(left + index as f64 * step, top, width, height))
            .collect(),
    }
}

/// Band where drags may start: the full viewport width across the slide row.
pub fn drag_area(viewport: &Viewport, layout: &TrackLayout) -> Rect {
    Rect::new(0.0, layout.track.top, viewport.width, layout.track.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slider::{InputModality, TrackBounds};

    #[test]
    fn default_layout_spaces_slides_evenly() {
        let viewport = Viewport::new(1000.0, 800.0, InputModality::Pointer);
        let layout = layout_slides(&viewport, &LayoutConfig::default(), 18);

        assert_eq!(layout.track, Rect::new(100.0, 160.0, 250.0, 480.0));
        assert_eq!(layout.items.len(), 18);
        assert_eq!(layout.items[1].left, 400.0);
        assert_eq!(layout.items[17].left, 100.0 + 17.0 * 300.0);

        let last = layout.items.last().unwrap();
        let bounds = TrackBounds::measure(&layout.track, last);
        assert_eq!(bounds.max, -5100.0);
    }

    #[test]
    fn drag_area_spans_viewport_across_slide_row() {
        let viewport = Viewport::new(1000.0, 800.0, InputModality::Pointer);
        let layout = layout_slides(&viewport, &LayoutConfig::default(), 6);
        assert_eq!(
            drag_area(&viewport, &layout),
            Rect::new(0.0, 160.0, 1000.0, 480.0)
        );
    }

    #[test]
    fn single_slide_layout_is_degenerate() {
        let viewport = Viewport::new(1000.0, 800.0, InputModality::Pointer);
        let layout = layout_slides(&viewport, &LayoutConfig::default(), 1);
        let bounds = TrackBounds::measure(&layout.track, &layout.items[0]);
        assert!(bounds.is_degenerate());
    }
}
