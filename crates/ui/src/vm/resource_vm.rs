use study_core::model::ResourceRef;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceRowVm {
    pub location: String,
    pub link: String,
    pub is_url: bool,
}

#[must_use]
pub fn map_resources(refs: &[ResourceRef<'_>]) -> Vec<ResourceRowVm> {
    refs.iter()
        .map(|r| {
            let location = match (r.topic, r.subtopic) {
                (Some(topic), Some(subtopic)) => format!("{} › {topic} › {subtopic}", r.subject),
                (Some(topic), None) => format!("{} › {topic}", r.subject),
                _ => r.subject.to_owned(),
            };
            ResourceRowVm {
                location,
                link: r.link.to_owned(),
                is_url: r.link.starts_with("http://") || r.link.starts_with("https://"),
            }
        })
        .collect()
}
