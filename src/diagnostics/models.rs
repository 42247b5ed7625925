//! Just enough of Agent's objects.xml to list the cameras.

#[derive(Debug, serde::Deserialize)]
pub(super) struct Objects {
    #[serde(default)]
    pub cameras: Cameras,
}

#[derive(Debug, Default, serde::Deserialize)]
pub(super) struct Cameras {
    #[serde(default)]
    pub camera: Vec<CameraObject>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct CameraObject {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Default, serde::Deserialize)]
pub(super) struct Settings {
    #[serde(default)]
    pub substream: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

impl From<CameraObject> for crate::common::Camera {
    fn from(value: CameraObject) -> Self {
        Self {
            name: value.name,
            url: value.settings.substream,
            login: value.settings.login,
            password: value.settings.password,
        }
    }
}
