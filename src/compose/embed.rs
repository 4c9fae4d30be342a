use anyhow::{Context, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

// @module: Importing pages of one PDF as Form XObjects of another

// US Letter, the conventional fallback when a page carries no MediaBox
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

// Depth limit for Parent-chain walks on malformed page trees
const MAX_INHERIT_DEPTH: usize = 10;

/// One source page embedded into the target document.
///
/// The XObject can be painted any number of times; overflow spreads reuse
/// the same object rather than re-embedding the page.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedPage {
    /// Id of the Form XObject in the target document
    pub xobject_id: ObjectId,
    /// Lower-left corner of the page box, needed to translate the box to
    /// the placement origin
    pub origin_x: f32,
    /// See `origin_x`
    pub origin_y: f32,
    /// Page box width in points
    pub width: f32,
    /// Page box height in points
    pub height: f32,
}

/// Move every page of `source` into `target` as a Form XObject.
///
/// The source document's objects are renumbered past the target's id range
/// and copied over wholesale; its page-tree objects become unreachable and
/// are dropped by the target's final `prune_objects` pass. Returns one
/// `EmbeddedPage` per source page, in page order.
pub fn embed_document_pages(
    target: &mut Document,
    mut source: Document,
) -> Result<Vec<EmbeddedPage>> {
    source.renumber_objects_with(target.max_id + 1);
    if source.max_id > target.max_id {
        target.max_id = source.max_id;
    }

    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    let mut embedded = Vec::with_capacity(page_ids.len());

    for page_id in page_ids {
        let content = source
            .get_page_content(page_id)
            .with_context(|| format!("Failed to read content of page object {:?}", page_id))?;
        let media_box = media_box_of(&source, page_id);
        let resources = resources_of(&source, page_id);

        let form_stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Form",
                "FormType" => 1,
                "BBox" => Object::Array(media_box.iter().map(|v| Object::Real(*v)).collect()),
                "Resources" => resources,
            },
            content,
        );
        let xobject_id = target.add_object(form_stream);

        embedded.push(EmbeddedPage {
            xobject_id,
            origin_x: media_box[0],
            origin_y: media_box[1],
            width: media_box[2] - media_box[0],
            height: media_box[3] - media_box[1],
        });
    }

    target.objects.extend(source.objects);
    Ok(embedded)
}

/// Resolve a possibly-inherited page attribute by walking the Parent chain.
pub(crate) fn resolve_inherited(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = doc.get_object(page_id).ok()?;
    for _ in 0..MAX_INHERIT_DEPTH {
        let dict = current.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        let parent_id = match dict.get(b"Parent") {
            Ok(Object::Reference(id)) => *id,
            _ => return None,
        };
        current = doc.get_object(parent_id).ok()?;
    }
    None
}

/// The page's MediaBox as `[x0, y0, x1, y1]`, falling back to US Letter.
pub(crate) fn media_box_of(doc: &Document, page_id: ObjectId) -> [f32; 4] {
    let Some(obj) = resolve_inherited(doc, page_id, b"MediaBox") else {
        return DEFAULT_MEDIA_BOX;
    };

    let arr = match &obj {
        Object::Array(arr) => Some(arr.clone()),
        Object::Reference(id) => match doc.get_object(*id) {
            Ok(Object::Array(arr)) => Some(arr.clone()),
            _ => None,
        },
        _ => None,
    };

    let Some(arr) = arr else {
        return DEFAULT_MEDIA_BOX;
    };

    let values: Vec<f32> = arr
        .iter()
        .filter_map(|o| match o {
            #[allow(clippy::cast_precision_loss)]
            Object::Integer(i) => Some(*i as f32),
            Object::Real(r) => Some(*r),
            _ => None,
        })
        .collect();

    if values.len() == 4 {
        [values[0], values[1], values[2], values[3]]
    } else {
        DEFAULT_MEDIA_BOX
    }
}

/// The page's Resources entry, inherited if necessary, as a direct object or
/// reference usable in an XObject dictionary. Missing resources become an
/// empty dictionary.
pub(crate) fn resources_of(doc: &Document, page_id: ObjectId) -> Object {
    match resolve_inherited(doc, page_id, b"Resources") {
        Some(obj @ Object::Reference(_)) => obj,
        Some(Object::Dictionary(dict)) => Object::Dictionary(dict),
        _ => Object::Dictionary(Dictionary::new()),
    }
}
