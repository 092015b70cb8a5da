//! Compiled-in region dataset
//!
//! Provincial and metropolitan seats plus a selection of their districts.
//! Names follow the weather service's Korean administrative form. Grid cells
//! are the cells the service assigns to each reference point; several
//! districts share a cell with their province seat.

use crate::models::RegionRecord;

const fn region(name: &'static str, x: i32, y: i32, lat: f64, lon: f64) -> RegionRecord {
    RegionRecord::new(name, x, y, lat, lon)
}

pub static REGIONS: &[RegionRecord] = &[
    region("서울특별시", 60, 127, 37.5635694, 126.9800083),
    region("서울특별시 종로구", 60, 127, 37.5735207, 126.9788345),
    region("서울특별시 중구", 60, 127, 37.5637561, 126.9975400),
    region("서울특별시 용산구", 60, 126, 37.5323890, 126.9905420),
    region("서울특별시 성동구", 61, 127, 37.5633415, 127.0371470),
    region("서울특별시 광진구", 62, 126, 37.5384843, 127.0822938),
    region("서울특별시 동대문구", 61, 127, 37.5744680, 127.0398190),
    region("서울특별시 성북구", 60, 127, 37.5894000, 127.0167490),
    region("서울특별시 노원구", 61, 129, 37.6542360, 127.0568290),
    region("서울특별시 은평구", 59, 127, 37.6027840, 126.9291640),
    region("서울특별시 서대문구", 59, 127, 37.5791158, 126.9367850),
    region("서울특별시 마포구", 58, 127, 37.5663245, 126.9014910),
    region("서울특별시 강서구", 58, 126, 37.5509786, 126.8495382),
    region("서울특별시 영등포구", 58, 126, 37.5263710, 126.8962420),
    region("서울특별시 관악구", 59, 125, 37.4781548, 126.9514847),
    region("서울특별시 서초구", 61, 125, 37.4837120, 127.0324112),
    region("서울특별시 강남구", 61, 126, 37.5173050, 127.0474990),
    region("서울특별시 송파구", 62, 126, 37.5145437, 127.1065971),
    region("서울특별시 강동구", 62, 126, 37.5301251, 127.1237631),
    region("부산광역시", 98, 76, 35.1770194, 129.0769528),
    region("부산광역시 중구", 97, 74, 35.1062360, 129.0323580),
    region("부산광역시 해운대구", 99, 75, 35.1631139, 129.1635860),
    region("부산광역시 사하구", 96, 74, 35.1046020, 128.9748050),
    region("대구광역시", 89, 90, 35.8685417, 128.6035528),
    region("대구광역시 수성구", 89, 90, 35.8581970, 128.6305520),
    region("대구광역시 달서구", 88, 90, 35.8299000, 128.5325000),
    region("인천광역시", 55, 124, 37.4532333, 126.7073528),
    region("인천광역시 중구", 54, 125, 37.4738170, 126.6216030),
    region("인천광역시 연수구", 55, 123, 37.4101000, 126.6783000),
    region("광주광역시", 58, 74, 35.1569750, 126.8533639),
    region("광주광역시 동구", 59, 74, 35.1460000, 126.9231000),
    region("대전광역시", 67, 100, 36.3471194, 127.3865667),
    region("대전광역시 유성구", 67, 101, 36.3623000, 127.3563000),
    region("울산광역시", 102, 84, 35.5354083, 129.3136889),
    region("세종특별자치시", 66, 103, 36.4800121, 127.2890691),
    region("경기도", 60, 120, 37.2718444, 127.0094778),
    region("경기도 수원시팔달구", 61, 121, 37.2825000, 127.0197000),
    region("경기도 성남시분당구", 62, 123, 37.3827611, 127.1189194),
    region("경기도 고양시일산동구", 56, 129, 37.6585000, 126.7749000),
    region("경기도 용인시처인구", 64, 120, 37.2340000, 127.2014000),
    region("경기도 파주시", 56, 131, 37.7600000, 126.7800000),
    region("강원도", 73, 134, 37.8853000, 127.7297000),
    region("강원도 강릉시", 92, 132, 37.7519000, 128.8761000),
    region("강원도 속초시", 87, 141, 38.2070000, 128.5918000),
    region("충청북도", 69, 107, 36.6357000, 127.4915000),
    region("충청북도 충주시", 76, 115, 36.9910000, 127.9259000),
    region("충청남도", 55, 107, 36.6588000, 126.6728000),
    region("충청남도 천안시동남구", 63, 110, 36.8065000, 127.1522000),
    region("전라북도", 63, 89, 35.8203000, 127.1088000),
    region("전라북도 전주시완산구", 63, 89, 35.8122000, 127.1198000),
    region("전라남도", 51, 67, 34.8161000, 126.4629000),
    region("전라남도 여수시", 73, 66, 34.7604000, 127.6622000),
    region("경상북도", 87, 106, 36.5760000, 128.5056000),
    region("경상북도 포항시남구", 102, 94, 36.0082000, 129.3593000),
    region("경상북도 울릉군", 127, 127, 37.4844000, 130.9057000),
    region("경상남도", 91, 77, 35.2383000, 128.6924000),
    region("경상남도 창원시의창구", 90, 77, 35.2539000, 128.6398000),
    region("경상남도 진주시", 81, 75, 35.1800000, 128.1076000),
    region("제주특별자치도", 52, 38, 33.4890000, 126.4983000),
    region("제주특별자치도 서귀포시", 53, 33, 33.2541000, 126.5601000),
    region("이어도", 28, 8, 32.1230000, 125.1820000),
];
