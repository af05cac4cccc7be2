//! Visual and RENDER picture format lookup.

use x11rb::protocol::render::{Pictformat, PictType, QueryPictFormatsReply};
use x11rb::protocol::xproto::{Screen, VisualClass, Visualid};

/// Depth-32 TrueColor visuals of `screen`, in server order
pub fn argb_candidates(screen: &Screen) -> impl Iterator<Item = Visualid> + '_ {
    screen
        .allowed_depths
        .iter()
        .filter(|depth| depth.depth == 32)
        .flat_map(|depth| depth.visuals.iter())
        .filter(|visual| visual.class == VisualClass::TRUE_COLOR)
        .map(|visual| visual.visual_id)
}

/// Picture format the server associates with `visual`
pub fn format_for_visual(formats: &QueryPictFormatsReply, visual: Visualid) -> Option<Pictformat> {
    formats
        .screens
        .iter()
        .flat_map(|screen| screen.depths.iter())
        .flat_map(|depth| depth.visuals.iter())
        .find(|v| v.visual == visual)
        .map(|v| v.format)
}

/// Whether `format` is a direct format carrying an alpha channel
pub fn has_alpha(formats: &QueryPictFormatsReply, format: Pictformat) -> bool {
    formats
        .formats
        .iter()
        .find(|info| info.id == format)
        .is_some_and(|info| info.type_ == PictType::DIRECT && info.direct.alpha_mask != 0)
}

/// First ARGB visual whose picture format really has alpha, with that format
pub fn find_argb(screen: &Screen, formats: &QueryPictFormatsReply) -> Option<(Visualid, Pictformat)> {
    argb_candidates(screen).find_map(|visual| {
        let format = format_for_visual(formats, visual)?;
        has_alpha(formats, format).then_some((visual, format))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use x11rb::protocol::render::{Directformat, Pictdepth, Pictforminfo, Pictscreen, Pictvisual};
    use x11rb::protocol::xproto::{BackingStore, Depth, EventMask, Visualtype};

    fn visual(visual_id: Visualid, class: VisualClass) -> Visualtype {
        Visualtype {
            visual_id,
            class,
            bits_per_rgb_value: 8,
            colormap_entries: 256,
            red_mask: 0xff0000,
            green_mask: 0x00ff00,
            blue_mask: 0x0000ff,
        }
    }

    fn screen(depths: Vec<Depth>) -> Screen {
        Screen {
            root: 0x100,
            default_colormap: 0x20,
            white_pixel: 0xffffff,
            black_pixel: 0,
            current_input_masks: EventMask::NO_EVENT,
            width_in_pixels: 2560,
            height_in_pixels: 1440,
            width_in_millimeters: 600,
            height_in_millimeters: 340,
            min_installed_maps: 1,
            max_installed_maps: 1,
            root_visual: 0x21,
            backing_stores: BackingStore::NOT_USEFUL,
            save_unders: false,
            root_depth: 24,
            allowed_depths: depths,
        }
    }

    fn format(id: Pictformat, depth: u8, alpha_mask: u16) -> Pictforminfo {
        Pictforminfo {
            id,
            type_: PictType::DIRECT,
            depth,
            direct: Directformat {
                red_shift: 16,
                red_mask: 0xff,
                green_shift: 8,
                green_mask: 0xff,
                blue_shift: 0,
                blue_mask: 0xff,
                alpha_shift: 24,
                alpha_mask,
            },
            colormap: 0,
        }
    }

    fn formats(formats: Vec<Pictforminfo>, visuals: Vec<Pictvisual>) -> QueryPictFormatsReply {
        QueryPictFormatsReply {
            sequence: 0,
            length: 0,
            num_depths: 1,
            num_visuals: visuals.len() as u32,
            formats,
            screens: vec![Pictscreen {
                fallback: 0,
                depths: vec![Pictdepth { depth: 32, visuals }],
            }],
            subpixels: vec![],
        }
    }

    #[test]
    fn picks_depth_32_truecolor_with_alpha() {
        let screen = screen(vec![
            Depth { depth: 24, visuals: vec![visual(0x21, VisualClass::TRUE_COLOR)] },
            Depth {
                depth: 32,
                visuals: vec![
                    visual(0x40, VisualClass::DIRECT_COLOR),
                    visual(0x41, VisualClass::TRUE_COLOR),
                    visual(0x42, VisualClass::TRUE_COLOR),
                ],
            },
        ]);
        let formats = formats(
            vec![format(0x30, 32, 0), format(0x31, 32, 0xff)],
            vec![
                Pictvisual { visual: 0x41, format: 0x30 },
                Pictvisual { visual: 0x42, format: 0x31 },
            ],
        );

        assert_eq!(argb_candidates(&screen).collect::<Vec<_>>(), vec![0x41, 0x42]);
        assert_eq!(find_argb(&screen, &formats), Some((0x42, 0x31)));
    }

    #[test]
    fn no_depth_32_means_no_argb_visual() {
        let screen = screen(vec![Depth { depth: 24, visuals: vec![visual(0x21, VisualClass::TRUE_COLOR)] }]);
        let formats = formats(vec![format(0x31, 32, 0xff)], vec![]);

        assert_eq!(find_argb(&screen, &formats), None);
        assert_eq!(format_for_visual(&formats, 0x21), None);
    }
}
