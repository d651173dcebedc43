pub mod asset;

pub use asset::{
    Asset, AssetBundle, AssetBundleBuilder, AssetError, AssetMetadata, AssetProvider,
    SharedAssetData, content_type_for, normalize_asset_path,
};
